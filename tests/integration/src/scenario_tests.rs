//! End-to-end scenarios: settings file -> index -> sync cycles
//!
//! The reference file lives on disk; the editor is the in-memory FakeHost.

use logsync_core::{
    Direction, LineRange, Mode, RevealMode, Settings, SyncEngine, SyncOutcome,
};
use logsync_fs::{NormalizedPath, PathStyle};
use logsync_index::{LocationIndex, SkipPattern, TokenPattern, scan_upward};
use logsync_test_utils::{FakeHost, RecordingSink, Workspace};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn numbered(lines: usize) -> String {
    (1..=lines).map(|i| format!("    stmt {i};\n")).collect()
}

#[tokio::test]
async fn settings_file_drives_full_session() {
    let reference = "\
build started
/src/main.c:3
    push rbp
    mov rbp, rsp
/src/main.c:4
    xor eax, eax
/src/util.c:7
    ret
";
    let ws = Workspace::with_reference(reference);
    ws.write(
        "logsync.toml",
        "referenceFilePath = \"$workspaceRoot/trace.log\"\npathStyle = \"posix\"\nhighlightColor = \"#00ff0040\"\n",
    );
    let settings = Settings::load(&ws.root().join("logsync.toml")).unwrap();

    let host = Arc::new(FakeHost::new());
    host.add_file(&ws.reference_str(), reference);
    host.add_file("/src/main.c", &numbered(10));
    host.add_file("/src/util.c", &numbered(10));
    let sink = Arc::new(RecordingSink::new());
    let engine = SyncEngine::new(host.clone(), sink.clone(), &settings, Some(ws.root()));

    let main = host.open_view("/src/main.c");
    assert_eq!(engine.toggle_mapping_mode().await.unwrap(), Mode::Single);
    assert_eq!(engine.toggle_mapping_mode().await.unwrap(), Mode::Bidirectional);
    assert_eq!(engine.index_len(), 3);
    let master = engine.snapshot().master.unwrap();

    // source -> log
    let outcome = engine.handle_selection(host.set_cursor(main, 2)).await;
    assert_eq!(outcome, SyncOutcome::Synced(Direction::AssistantToMaster));
    assert_eq!(host.highlighted_lines(master), vec![1, 2, 3]);
    assert_eq!(host.highlighted_lines(main), vec![2]);

    // log -> same source file
    let outcome = engine.handle_selection(host.set_cursor(master, 5)).await;
    assert_eq!(outcome, SyncOutcome::Synced(Direction::MasterToAssistant));
    assert_eq!(host.highlighted_lines(main), vec![3]);
    assert_eq!(host.highlighted_lines(master), vec![4, 5]);

    // log -> another source file, which takes over as the tracked view
    let outcome = engine.handle_selection(host.set_cursor(master, 7)).await;
    assert_eq!(outcome, SyncOutcome::Synced(Direction::MasterToAssistant));
    let util = host.view_of("/src/util.c").unwrap();
    assert_eq!(host.cursor(util), Some(6));
    assert_eq!(host.highlighted_lines(util), vec![6]);
    assert_eq!(host.highlighted_lines(master), vec![6, 7]);
    assert!(host.highlighted_lines(main).is_empty());

    // the header line has no token above it
    let outcome = engine.handle_selection(host.set_cursor(master, 0)).await;
    assert_eq!(outcome, SyncOutcome::NoToken);

    engine.deactivate();
    assert!(host.highlighted_lines(master).is_empty());
    assert!(host.highlighted_lines(util).is_empty());
    assert!(host.errors().is_empty());
    assert!(sink.errors().is_empty());
}

#[tokio::test]
async fn windows_drive_letters_match_regardless_of_case() {
    let reference = "c:\\src\\a.c:2\n    asm\nC:/src/a.c:3\n";
    let ws = Workspace::with_reference(reference);
    let settings = Settings {
        path_style: PathStyle::Windows,
        ..ws.settings()
    };

    let host = Arc::new(FakeHost::new());
    host.add_file(&ws.reference_str(), reference);
    host.add_file("C:/src/a.c", &numbered(5));
    let engine = SyncEngine::new(host.clone(), Arc::new(RecordingSink::new()), &settings, Some(ws.root()));

    let source = host.open_view("C:/src/a.c");
    engine.toggle_mapping_mode().await.unwrap();
    let master = engine.snapshot().master.unwrap();
    host.clear_calls();

    let outcome = engine.handle_selection(host.set_cursor(source, 1)).await;
    assert_eq!(outcome, SyncOutcome::Synced(Direction::AssistantToMaster));
    assert_eq!(host.reveals(), vec![(master, LineRange::lines(0, 2), RevealMode::InCenter)]);

    let outcome = engine.handle_selection(host.set_cursor(source, 2)).await;
    assert_eq!(outcome, SyncOutcome::Synced(Direction::AssistantToMaster));
    assert_eq!(host.highlighted_lines(master), vec![2]);
}

#[tokio::test]
async fn rewritten_reference_is_picked_up_after_reload() {
    let ws = Workspace::with_reference("/src/a.c:1\n");
    let host = Arc::new(FakeHost::new());
    host.add_file(&ws.reference_str(), "/src/a.c:1\n");
    host.add_file("/src/a.c", &numbered(5));
    let engine = SyncEngine::new(host.clone(), Arc::new(RecordingSink::new()), &ws.settings(), Some(ws.root()));

    host.open_view("/src/a.c");
    engine.toggle_mapping_mode().await.unwrap();
    assert_eq!(engine.index_len(), 1);

    let second = ws.write("second.log", "/src/a.c:1\n/src/a.c:2\n/src/a.c:3\n");
    let settings = Settings {
        path_style: PathStyle::Posix,
        ..Settings::for_reference(second.to_string_lossy())
    };
    engine.reload(&settings, Some(ws.root())).unwrap();
    engine.disable_mapping();
    host.add_file(&second.to_string_lossy(), "/src/a.c:1\n/src/a.c:2\n/src/a.c:3\n");
    engine.toggle_mapping_mode().await.unwrap();

    assert_eq!(engine.index_len(), 3);
    let master = engine.snapshot().master.unwrap();
    assert_eq!(host.view_of(&second.to_string_lossy()), Some(master));
}

#[test]
fn every_line_of_a_block_scans_back_to_its_token() {
    let text = "\
/src/a.c:1
    one
    two
/src/b.c:5
plain
/src/a.c:9
    three
";
    let pattern = TokenPattern::platform_default(PathStyle::Posix);
    let skip = SkipPattern::default();
    let index = LocationIndex::extract(text, &pattern, &skip, PathStyle::Posix);
    let lines: Vec<&str> = text.lines().collect();

    for (path, file) in index.files() {
        for (line, entry) in file.iter() {
            for offset in entry.log_line..entry.end_line() {
                let (token_line, token) =
                    scan_upward(offset, &pattern, &skip, |i| lines.get(i).copied()).unwrap();
                assert_eq!(token_line, entry.log_line);
                assert_eq!(token.line, line);
                assert_eq!(&token.normalized_path(PathStyle::Posix).unwrap(), path);
            }
        }
    }

    let a = NormalizedPath::new("/src/a.c");
    assert_eq!(index.lookup(&a, 1).map(|e| e.span), Some(3));
    assert_eq!(index.lookup(&a, 9).map(|e| e.span), Some(2));
}
