//! Drives a full editing session headlessly and prints the exported
//! document: build a small pipeline, zoom in on it, drag a node, connect
//! two more, and autosave.
//!
//! Run with `RUST_LOG=debug cargo run --example scripted_session` to watch
//! the gesture and viewport transitions.

use wf_core::Storage;
use wf_core::geometry::Point;
use wf_editor::{Editor, InputEvent};

fn main() {
    env_logger::init();

    let mut editor = Editor::new();

    // Library inserts: a three-stage pipeline plus a reminder note.
    let ingest = editor.add_node_at("dataSource", Point::new(80.0, 200.0));
    let clean = editor.add_node_at("transform", Point::new(420.0, 200.0));
    let store = editor.add_node_at("storage", Point::new(760.0, 200.0));
    editor.add_note(Point::new(80.0, 420.0), "ingest runs nightly");

    editor.add_connection(ingest, clean);
    editor.add_connection(clean, store);

    // Zoom in towards the middle node, then pan the canvas a bit.
    editor.handle_event(InputEvent::wheel(520.0, 260.0, -200.0));
    editor.handle_event(InputEvent::pointer_down(1200.0, 600.0));
    editor.handle_event(InputEvent::pointer_move(1100.0, 560.0));
    editor.handle_event(InputEvent::pointer_up(1100.0, 560.0));

    // Drag the storage node: pointer-down on its body, move, release.
    let grab = wf_core::world_to_screen(Point::new(860.0, 260.0), editor.transform());
    editor.handle_event(InputEvent::pointer_down(grab.x, grab.y));
    editor.handle_event(InputEvent::pointer_move(grab.x + 90.0, grab.y + 30.0));
    editor.handle_event(InputEvent::pointer_up(grab.x + 90.0, grab.y + 30.0));

    println!("scale {:.3}, offset ({:.1}, {:.1})",
        editor.scale(),
        editor.offset().x,
        editor.offset().y
    );
    println!("{}", editor.export_json());

    // Best-effort autosave, as a host would on its save-on-change tick.
    if editor.is_dirty() {
        let storage = Storage::new(std::env::temp_dir().join("wireflow-example"));
        storage.save_autosave(editor.workflow());
        editor.clear_dirty();
    }
}
