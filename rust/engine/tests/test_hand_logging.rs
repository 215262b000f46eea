use std::fs;
use std::path::PathBuf;

use quickdraw_engine::cards::Card;
use quickdraw_engine::hand::{evaluate_hand, HandCategory};
use quickdraw_engine::logger::{format_hand_id, HandLogger, HandRecord};
use quickdraw_engine::session::GameMode;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn sample_record(hand_id: &str) -> HandRecord {
    let cards: Vec<Card> = ["As", "Ad", "Ac", "7s", "7h"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let result = evaluate_hand(&cards);
    HandRecord::from_result(hand_id.to_string(), GameMode::Classic, 1, &result, 856)
}

#[test]
fn writes_jsonl_with_lf_only() {
    let path = tmp_path("handlog");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&sample_record("20250102-000001")).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    let _ = fs::remove_file(&path);
}

#[test]
fn sequential_ids_increment() {
    let mut logger = HandLogger::with_seq_for_test("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
    assert_eq!(format_hand_id("20250101", 123456), "20250101-123456");
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let path = tmp_path("handlog_ts");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let rec = sample_record("20250102-000010");
    logger.write(&rec).expect("write");
    let line = String::from_utf8(fs::read(&path).unwrap()).unwrap();
    assert!(line.contains("\"ts\":"), "ts should be injected");

    let preset = "2030-01-01T00:00:00Z".to_string();
    let rec2 = HandRecord {
        ts: Some(preset.clone()),
        ..rec
    };
    logger.write(&rec2).expect("write2");
    let content = String::from_utf8(fs::read(&path).unwrap()).unwrap();
    assert!(content.contains(&preset), "preset ts must be kept");
    assert_eq!(content.lines().count(), 2);
    let _ = fs::remove_file(&path);
}

#[test]
fn records_round_trip_through_json() {
    let path = tmp_path("handlog_parse");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let rec = sample_record("20250102-000002");
    logger.write(&rec).expect("write");

    let content = fs::read_to_string(&path).unwrap();
    let parsed: HandRecord = serde_json::from_str(content.trim_end()).expect("valid json");
    assert_eq!(parsed.category, HandCategory::FullHouse);
    assert_eq!(parsed.value_bonus, 56);
    assert_eq!(parsed.total_points, HandCategory::FullHouse.base_points() + 56);
    assert_eq!(parsed.mode, GameMode::Classic);
    assert_eq!(parsed.cards, rec.cards);

    let raw: serde_json::Value = serde_json::from_str(content.trim_end()).unwrap();
    assert_eq!(raw["mode"], "classic");
    assert_eq!(raw["category"], "full_house");
    assert_eq!(raw["cards"][0]["suit"], "spades");
    let _ = fs::remove_file(&path);
}

#[test]
fn creates_missing_parent_directories() {
    let mut dir = PathBuf::from("target");
    dir.push(format!("handlog_nested_{}", std::process::id()));
    let path = dir.join("deep").join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&sample_record("20250102-000003")).expect("write");
    assert!(path.exists());
    let _ = fs::remove_dir_all(&dir);
}
