use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BracketError {
    #[error("opening and closing brackets must differ, both are '{0}'")]
    SameBrackets(char),

    #[error("character '{found}' at index {index} is not a bracket")]
    NotABracket { index: usize, found: char },

    #[error("index {index} is not a valid position in a string of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("string contains unmatched brackets")]
    Unmatched,
}

pub type Result<T> = std::result::Result<T, BracketError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Reverse,
}

/// A pair of single-character brackets
///
/// All indices are byte offsets into the searched string and always fall
/// on character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brackets {
    open: char,
    close: char,
}

impl Default for Brackets {
    fn default() -> Self {
        Brackets::PAREN
    }
}

impl Brackets {
    pub const PAREN: Brackets = Brackets {
        open: '(',
        close: ')',
    };

    pub fn new(open: char, close: char) -> Result<Self> {
        if open == close {
            return Err(BracketError::SameBrackets(open));
        }
        Ok(Brackets { open, close })
    }

    pub fn open(&self) -> char {
        self.open
    }

    pub fn close(&self) -> char {
        self.close
    }

    /// Every opening bracket has a closing bracket later in the string
    pub fn contains_all_matched(&self, s: &str) -> bool {
        let mut depth: i64 = 0;
        for c in s.chars() {
            if c == self.open {
                depth += 1;
            } else if c == self.close {
                depth -= 1;
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0
    }

    /// Index of the bracket paired with the one at `index`
    ///
    /// Searches forward from an opening bracket and backward from a closing
    /// one. Returns `Ok(None)` when the bracket has no partner.
    pub fn find_matching(&self, s: &str, index: usize) -> Result<Option<usize>> {
        let c = char_at(s, index)?;
        let direction = if c == self.open {
            SearchDirection::Forward
        } else if c == self.close {
            SearchDirection::Reverse
        } else {
            return Err(BracketError::NotABracket { index, found: c });
        };

        let mut depth: i64 = 0;
        let mut i = index;
        loop {
            let c = char_at(s, i)?;
            if c == self.open {
                depth += 1;
            } else if c == self.close {
                depth -= 1;
            }
            if depth == 0 {
                return Ok(Some(i));
            }
            match step(s, i, direction) {
                Some(next) => i = next,
                None => return Ok(None),
            }
        }
    }

    /// Find the first of `targets` starting at `begin`, skipping over the
    /// contents of matched brackets
    ///
    /// The search never enters a bracket pair it reaches, but when `begin`
    /// lies inside brackets the search may leave them.
    pub fn find_skip(
        &self,
        s: &str,
        targets: &[char],
        begin: usize,
        direction: SearchDirection,
    ) -> Result<Option<usize>> {
        char_at(s, begin)?;
        if !self.contains_all_matched(s) {
            return Err(BracketError::Unmatched);
        }

        let mut i = begin;
        loop {
            let c = char_at(s, i)?;
            if targets.contains(&c) {
                return Ok(Some(i));
            }

            let enters_pair = match direction {
                SearchDirection::Forward => c == self.open,
                SearchDirection::Reverse => c == self.close,
            };
            if enters_pair {
                i = self.find_matching(s, i)?.ok_or(BracketError::Unmatched)?;
            }

            match step(s, i, direction) {
                Some(next) => i = next,
                None => return Ok(None),
            }
        }
    }

    /// First top-level occurrence of `target`, searching left to right
    pub fn find_top_level(&self, s: &str, target: char) -> Result<Option<usize>> {
        if s.is_empty() {
            return Ok(None);
        }
        self.find_skip(s, &[target], 0, SearchDirection::Forward)
    }

    /// Last top-level occurrence of `target`, searching right to left
    pub fn rfind_top_level(&self, s: &str, target: char) -> Result<Option<usize>> {
        match s.char_indices().next_back() {
            Some((last, _)) => self.find_skip(s, &[target], last, SearchDirection::Reverse),
            None => Ok(None),
        }
    }

    /// Remove surrounding whitespace and enclosing matched bracket pairs
    ///
    /// A leading and trailing bracket are only removed when they pair with
    /// each other, so `(a)*(b)` is returned unchanged. `max_pairs` caps the
    /// number of layers removed; `None` removes all of them.
    pub fn strip_matched<'a>(&self, s: &'a str, max_pairs: Option<usize>) -> &'a str {
        let mut value = s.trim();
        let mut removed = 0;

        while value.starts_with(self.open) && value.ends_with(self.close) {
            if max_pairs.is_some_and(|max| removed >= max) {
                break;
            }

            let last = value.len() - self.close.len_utf8();
            if !matches!(self.find_matching(value, last), Ok(Some(0))) {
                break;
            }

            value = value[self.open.len_utf8()..last].trim();
            removed += 1;
        }

        value
    }
}

fn char_at(s: &str, index: usize) -> Result<char> {
    s.get(index..)
        .and_then(|rest| rest.chars().next())
        .ok_or(BracketError::IndexOutOfRange {
            index,
            len: s.len(),
        })
}

fn step(s: &str, index: usize, direction: SearchDirection) -> Option<usize> {
    match direction {
        SearchDirection::Forward => {
            let width = s[index..].chars().next()?.len_utf8();
            let next = index + width;
            (next < s.len()).then_some(next)
        }
        SearchDirection::Reverse => s[..index].char_indices().next_back().map(|(i, _)| i),
    }
}
