//! Pure ordered sequences of identifiers.
//!
//! Every operation borrows the collection and returns a new one, so a snapshot
//! retained for rollback never shares storage with the snapshot that replaces it.

use crate::domain::task::TaskId;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, hash::Hash, str::FromStr};

/// A linear order over identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> FromIterator<T> for OrderedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> From<Vec<T>> for OrderedCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Clone + PartialEq> OrderedCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    /// Removes the item at `index`, returning the shortened collection and the item
    pub fn remove_at(&self, index: usize) -> Result<(Self, T)> {
        if index >= self.items.len() {
            return Err(BoardError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let mut items = self.items.clone();
        let removed = items.remove(index);
        Ok((Self { items }, removed))
    }

    /// Inserts `item` before position `index`; `index == len` appends.
    ///
    /// No duplicate check is done here. Callers remove an id from its prior
    /// position before inserting it elsewhere.
    pub fn insert_at(&self, index: usize, item: T) -> Result<Self> {
        if index > self.items.len() {
            return Err(BoardError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let mut items = self.items.clone();
        items.insert(index, item);
        Ok(Self { items })
    }

    /// Swaps in a whole new sequence
    pub fn replace(&self, items: Vec<T>) -> Self {
        Self { items }
    }

    /// Moves the item at `from` so that it ends up at `to`.
    ///
    /// `to` is interpreted against the sequence after removal, so the moved
    /// item is found at exactly `to` in the result.
    pub fn move_item(&self, from: usize, to: usize) -> Result<Self> {
        let (without, item) = self.remove_at(from)?;
        without.insert_at(to, item)
    }

    /// Returns the collection with every occurrence of `item` dropped
    pub fn without(&self, item: &T) -> Self {
        self.items
            .iter()
            .filter(|candidate| *candidate != item)
            .cloned()
            .collect()
    }
}

impl<T: Clone + Eq + Hash> OrderedCollection<T> {
    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.items.len());
        !self.items.iter().all(|item| seen.insert(item))
    }

    /// True when both collections hold the same members, ignoring order
    pub fn is_permutation_of(&self, other: &Self) -> bool {
        if self.len() != other.len() || self.has_duplicates() || other.has_duplicates() {
            return false;
        }
        let mine: HashSet<&T> = self.items.iter().collect();
        other.items.iter().all(|item| mine.contains(item))
    }
}

impl<'a, T> IntoIterator for &'a OrderedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Wire encoding of a list's task order: task ids joined by commas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderToken(String);

impl OrderToken {
    const SEPARATOR: &'static str = ",";

    pub fn encode(order: &OrderedCollection<TaskId>) -> Self {
        let joined = order
            .iter()
            .map(TaskId::as_str)
            .collect::<Vec<_>>()
            .join(Self::SEPARATOR);
        Self(joined)
    }

    pub fn decode(&self) -> Result<OrderedCollection<TaskId>> {
        if self.0.is_empty() {
            return Ok(OrderedCollection::default());
        }
        self.0
            .split(Self::SEPARATOR)
            .map(|part| {
                TaskId::from_str(part).map_err(|_| BoardError::InvalidOrderToken(self.0.clone()))
            })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderToken {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        let token = Self(s.to_string());
        token.decode()?;
        Ok(token)
    }
}

impl TryFrom<String> for OrderToken {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_str(&value)
    }
}

impl From<OrderToken> for String {
    fn from(token: OrderToken) -> Self {
        token.0
    }
}

impl fmt::Display for OrderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
