//! Shared fixtures for this crate's unit tests

use serde::{Deserialize, Serialize};

use crewboard_query::{SortKey, Sortable};

use crate::entity::{Entity, Schema, Stored};
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub id: String,
    pub title: String,
    pub rank: i64,
}

impl Entity for Doc {
    type Id = String;

    const KIND: &'static str = "doc";

    fn id(&self) -> String {
        self.id.clone()
    }
}

impl Sortable for Doc {
    fn sort_fields() -> &'static [&'static str] {
        &["title", "rank"]
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "title" => Some(SortKey::Text(self.title.clone())),
            "rank" => Some(SortKey::Int(self.rank)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Docs {
    pub docs: Table<Doc>,
}

impl Schema for Docs {}

impl Stored<Docs> for Doc {
    fn table(schema: &Docs) -> &Table<Doc> {
        &schema.docs
    }

    fn table_mut(schema: &mut Docs) -> &mut Table<Doc> {
        &mut schema.docs
    }
}

pub fn doc(id: &str, title: &str, rank: i64) -> Doc {
    Doc {
        id: id.into(),
        title: title.into(),
        rank,
    }
}
