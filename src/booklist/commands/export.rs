use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BookError, Result};
use crate::model::Book;
use crate::shelf::Shelf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON envelope written by `export` and accepted by `import`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    pub exported_at: DateTime<Utc>,
    pub books: Vec<Book>,
}

pub fn run(shelf: &Shelf) -> Result<CmdResult> {
    let doc = ExportDocument {
        exported_at: Utc::now(),
        books: shelf.books().to_vec(),
    };
    let json = serde_json::to_string_pretty(&doc).map_err(BookError::Serialization)?;

    let mut result = CmdResult::default().with_export(json);
    result.add_message(CmdMessage::info(format!(
        "Exported {} books",
        doc.books.len()
    )));
    Ok(result)
}
