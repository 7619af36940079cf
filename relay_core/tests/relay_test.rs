//! End-to-end relay tests: sender filter -> UDP loopback -> state machine.

use std::time::Duration;

use relay_core::{MemorySink, ScoreTracker, SenderFilter, Slot};
use serde_json::{json, Map, Value};
use tokio::net::UdpSocket;

fn raw_state(home: &str, visitor: &str, clock: &str, set: &str) -> Map<String, Value> {
    json!({
        "home_score": home,
        "visitor_score": visitor,
        "clock": clock,
        "set": set,
    })
    .as_object()
    .cloned()
    .unwrap()
}

async fn recv(socket: &UdpSocket) -> Vec<u8> {
    let mut buf = [0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(1), socket.recv_from(&mut buf))
        .await
        .expect("timed out waiting for datagram")
        .expect("recv failed");
    buf[..len].to_vec()
}

#[tokio::test]
async fn test_snapshot_relayed_end_to_end() {
    let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let receiver_addr = receiver.local_addr().unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();

    let mut filter = SenderFilter::new();
    let mut tracker = ScoreTracker::new(MemorySink::new());

    let snapshot = filter
        .on_update(&raw_state("5", "3", "12:34", "2nd"))
        .unwrap();
    let payload = serde_json::to_vec(&snapshot).unwrap();
    sender.send_to(&payload, receiver_addr).await.unwrap();

    let datagram = recv(&receiver).await;
    let changes = tracker.on_message(&datagram).unwrap();

    assert!(!changes.is_empty());
    assert_eq!(tracker.sink().get(Slot::HomeScore), Some("05"));
    assert_eq!(tracker.sink().get(Slot::VisitorScore), Some("03"));
    assert_eq!(tracker.sink().get(Slot::Clock), Some("12:34"));
    assert_eq!(tracker.sink().get(Slot::SetNumber), Some("2"));
}

#[tokio::test]
async fn test_set_win_relayed_end_to_end() {
    let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let receiver_addr = receiver.local_addr().unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();

    let mut filter = SenderFilter::new();
    let mut tracker = ScoreTracker::new(MemorySink::new());

    for state in [
        raw_state("24", "22", "--:--", "1"),
        raw_state("25", "22", "--:--", "1"),
    ] {
        let snapshot = filter.on_update(&state).unwrap();
        let payload = serde_json::to_vec(&snapshot).unwrap();
        sender.send_to(&payload, receiver_addr).await.unwrap();
        let datagram = recv(&receiver).await;
        tracker.on_message(&datagram).unwrap();
    }

    assert_eq!(tracker.sink().get(Slot::HomeSetWin), Some("SET 1 WIN"));
    assert_eq!(tracker.sink().get(Slot::VisitorSetWin), Some("0"));
}

#[tokio::test]
async fn test_duplicate_console_state_not_transmitted() {
    let mut filter = SenderFilter::new();
    assert!(filter.on_update(&raw_state("10", "8", "00:00", "1")).is_some());
    assert!(filter.on_update(&raw_state("10", "8", "00:00", "1")).is_none());
    assert!(filter.on_update(&raw_state("11", "8", "00:00", "1")).is_some());
}

#[tokio::test]
async fn test_garbage_datagram_then_recovery() {
    let mut tracker = ScoreTracker::new(MemorySink::new());

    assert!(tracker.on_message(&[0xff, 0xfe, 0x00]).is_err());

    // The next well-formed snapshot fully resynchronizes state
    let snapshot = SenderFilter::new()
        .on_update(&raw_state("1", "0", "00:10", "1"))
        .unwrap();
    let changes = tracker
        .on_message(&serde_json::to_vec(&snapshot).unwrap())
        .unwrap();
    assert!(!changes.is_empty());
    assert_eq!(tracker.sink().get(Slot::HomeScore), Some("01"));
}
