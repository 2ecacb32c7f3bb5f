use serde::{Deserialize, Serialize};

/// What was dragged: a task inside a list, or a whole list across the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Item,
    Collection,
}

/// A slot within a droppable collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    /// Droppable id as emitted by the presentation layer: a list id for item
    /// drags, the board for collection drags
    pub collection_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(collection_id: impl Into<String>, index: usize) -> Self {
        Self {
            collection_id: collection_id.into(),
            index,
        }
    }
}

/// The outcome of a completed drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    pub source: DragLocation,
    /// `None` when the item was released outside any drop target
    pub destination: Option<DragLocation>,
    pub dragged_id: String,
    pub kind: DragKind,
}

impl DragResult {
    /// A task drag from one list slot to another
    pub fn item(
        dragged_id: impl Into<String>,
        source: DragLocation,
        destination: DragLocation,
    ) -> Self {
        Self {
            source,
            destination: Some(destination),
            dragged_id: dragged_id.into(),
            kind: DragKind::Item,
        }
    }

    /// A list drag along the board
    pub fn collection(
        dragged_id: impl Into<String>,
        board_id: impl Into<String>,
        from: usize,
        to: usize,
    ) -> Self {
        let board_id = board_id.into();
        Self {
            source: DragLocation::new(board_id.clone(), from),
            destination: Some(DragLocation::new(board_id, to)),
            dragged_id: dragged_id.into(),
            kind: DragKind::Collection,
        }
    }

    /// A drag released with no drop target
    pub fn cancelled(dragged_id: impl Into<String>, source: DragLocation, kind: DragKind) -> Self {
        Self {
            source,
            destination: None,
            dragged_id: dragged_id.into(),
            kind,
        }
    }

    /// True when the item was dropped back where it started
    pub fn is_in_place(&self) -> bool {
        self.destination.as_ref() == Some(&self.source)
    }

    /// The drag that undoes this one, with source and destination swapped
    pub fn inverse(&self) -> Option<Self> {
        let destination = self.destination.clone()?;
        Some(Self {
            source: destination,
            destination: Some(self.source.clone()),
            dragged_id: self.dragged_id.clone(),
            kind: self.kind,
        })
    }
}
