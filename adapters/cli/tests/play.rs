use std::process::{Command, Output};

use dungeon_doors_core::{BoardSnapshot, CellCoord, EntityKind};

fn dungeon_doors(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dungeon-doors"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(args)
        .output()
        .expect("failed to launch dungeon-doors")
}

#[test]
fn auto_play_wins_the_corridor_and_reports_the_final_board() {
    let output = dungeon_doors(&["play", "../../assets/maps/corridor.txt", "--auto", "--json"]);
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let (text, json) = stdout
        .split_once("\n{")
        .expect("board json follows the text board");
    assert!(text.lines().any(|line| line == "You win!"), "{text}");

    let board: BoardSnapshot =
        serde_json::from_str(&format!("{{{json}")).expect("board json parses");
    assert_eq!((board.columns, board.rows), (5, 1));

    let player = board
        .entities
        .iter()
        .find(|entity| entity.kind == EntityKind::Player)
        .expect("player in snapshot");
    assert!(player.alive);
    assert_eq!(player.cell, CellCoord::new(4, 0));
    assert_eq!(player.level.get(), 4);
    assert!(board
        .entities
        .iter()
        .filter(|entity| entity.kind != EntityKind::Player)
        .all(|entity| !entity.alive));
}

#[test]
fn missing_map_fails_with_context() {
    let output = dungeon_doors(&["play", "no-such-map"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read map"), "{stderr}");
}
