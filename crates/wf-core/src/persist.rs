//! Workflow document import/export (JSON).
//!
//! The persisted format is a flat document: three arrays, no schema
//! versioning. Import is all-or-nothing — the document either deserializes
//! completely (every node with string `id`/`type`/`label` and numeric
//! position/size, every connection with string `id`/`from`/`to`, every note
//! with string `id`/`text`) or is rejected with a descriptive error and the
//! in-memory workflow stays untouched. Older exports name the node array
//! `objects`; both spellings are accepted.

use crate::model::{Connection, Node, Note, Workflow};
use std::fs;
use std::path::Path;

/// Uploads larger than this are rejected before parsing.
pub const MAX_IMPORT_BYTES: u64 = 10 * 1024 * 1024;

/// The on-disk document shape.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorkflowDoc {
    #[serde(alias = "objects")]
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub notes: Vec<Note>,
}

impl WorkflowDoc {
    /// Snapshot a workflow into document form.
    pub fn from_workflow(wf: &Workflow) -> Self {
        Self {
            nodes: wf.nodes().cloned().collect(),
            connections: wf.connections().copied().collect(),
            notes: wf.notes().to_vec(),
        }
    }

    /// Materialize the document as a live workflow.
    ///
    /// Connections whose endpoints are missing or self-referential cannot
    /// be represented (the model forbids dangling references), so they are
    /// dropped with a warning rather than failing the whole import — the
    /// document validation contract checks shapes, not referential
    /// integrity.
    pub fn into_workflow(self) -> Workflow {
        let mut wf = Workflow::new();
        for node in self.nodes {
            wf.insert_node(node);
        }
        for conn in self.connections {
            if !wf.insert_connection(conn) {
                log::warn!(
                    "dropping connection {} ({} -> {}): endpoint missing or self-loop",
                    conn.id,
                    conn.from,
                    conn.to
                );
            }
        }
        for note in self.notes {
            wf.insert_note(note);
        }
        wf
    }
}

/// Parse a JSON document string. Any structural mismatch rejects the whole
/// document.
pub fn parse_document(json: &str) -> Result<WorkflowDoc, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid workflow document: {e}"))
}

/// Parse and materialize in one step.
pub fn import_document(json: &str) -> Result<Workflow, String> {
    parse_document(json).map(WorkflowDoc::into_workflow)
}

/// Serialize a workflow as pretty-printed JSON.
pub fn export_json(wf: &Workflow) -> String {
    // Serializing a plain struct of Vecs cannot fail.
    serde_json::to_string_pretty(&WorkflowDoc::from_workflow(wf))
        .expect("workflow document serialization is infallible")
}

/// True when a payload of `len` bytes exceeds the import cap.
pub fn exceeds_size_limit(len: u64) -> bool {
    len > MAX_IMPORT_BYTES
}

/// Import a workflow from a file, applying the boundary guards before any
/// read or parse: the name must end in `.json` and the file must be at
/// most [`MAX_IMPORT_BYTES`] long.
pub fn import_file(path: &Path) -> Result<Workflow, String> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err("please select a .json file".to_string());
    }

    let meta = fs::metadata(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    if exceeds_size_limit(meta.len()) {
        return Err("file size exceeds the 10 MiB limit".to_string());
    }

    let json = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    import_document(&json)
}

/// Export a workflow to a file as JSON.
pub fn export_file(wf: &Workflow, path: &Path) -> Result<(), String> {
    fs::write(path, export_json(wf)).map_err(|e| format!("cannot write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    const VALID: &str = r#"{
        "nodes": [
            {
                "id": "a",
                "type": "task",
                "label": "Task A",
                "position": { "x": 100.0, "y": 100.0 },
                "size": { "width": 200.0, "height": 120.0 }
            },
            {
                "id": "b",
                "type": "milestone",
                "label": "Ship",
                "position": { "x": 500.0, "y": 100.0 },
                "size": { "width": 220.0, "height": 140.0 }
            }
        ],
        "connections": [ { "id": "c1", "from": "a", "to": "b" } ],
        "notes": [ { "id": "n1", "position": { "x": 0.0, "y": 300.0 }, "text": "check" } ]
    }"#;

    #[test]
    fn valid_document_imports() {
        let wf = import_document(VALID).unwrap();
        assert_eq!(wf.node_count(), 2);
        assert_eq!(wf.connection_count(), 1);
        assert_eq!(wf.notes().len(), 1);
    }

    #[test]
    fn objects_alias_is_accepted() {
        let json = VALID.replacen("\"nodes\"", "\"objects\"", 1);
        let wf = import_document(&json).unwrap();
        assert_eq!(wf.node_count(), 2);
    }

    #[test]
    fn missing_connections_array_rejects_document() {
        let json = r#"{ "nodes": [], "notes": [] }"#;
        let err = import_document(json).unwrap_err();
        assert!(err.contains("invalid workflow document"), "got: {err}");
    }

    #[test]
    fn non_numeric_position_rejects_document() {
        let json = r#"{
            "nodes": [{
                "id": "a", "type": "task", "label": "A",
                "position": { "x": "oops", "y": 0.0 },
                "size": { "width": 200.0, "height": 120.0 }
            }],
            "connections": [],
            "notes": []
        }"#;
        assert!(import_document(json).is_err());
    }

    #[test]
    fn dangling_connection_is_dropped_not_fatal() {
        let json = r#"{
            "nodes": [{
                "id": "a", "type": "task", "label": "A",
                "position": { "x": 0.0, "y": 0.0 },
                "size": { "width": 200.0, "height": 120.0 }
            }],
            "connections": [ { "id": "c1", "from": "a", "to": "ghost" } ],
            "notes": []
        }"#;
        let wf = import_document(json).unwrap();
        assert_eq!(wf.node_count(), 1);
        assert_eq!(wf.connection_count(), 0);
    }

    #[test]
    fn export_import_roundtrip() {
        let mut wf = Workflow::new();
        let a = wf.add_node("task", Point::new(10.0, 20.0));
        let b = wf.add_node("gateway", Point::new(400.0, 20.0));
        wf.add_connection(a, b).unwrap();
        wf.add_note(Point::new(-50.0, 0.0), "todo: review");

        let back = import_document(&export_json(&wf)).unwrap();
        assert_eq!(back.node_count(), 2);
        assert_eq!(back.connection_count(), 1);
        assert_eq!(back.notes().len(), 1);
        assert_eq!(back.node(a).unwrap().position, Point::new(10.0, 20.0));
    }

    #[test]
    fn size_limit_boundary() {
        assert!(!exceeds_size_limit(MAX_IMPORT_BYTES));
        assert!(exceeds_size_limit(MAX_IMPORT_BYTES + 1));
    }

    #[test]
    fn non_json_extension_rejected_before_read() {
        // The path does not exist; the extension guard fires first.
        let err = import_file(Path::new("/no/such/workflow.txt")).unwrap_err();
        assert!(err.contains(".json"), "got: {err}");
    }
}
