use anyhow::Context;
use std::path::Path;

use crate::roster::{Roster, StudentRecord, MAX_STUDENTS};

pub const DATA_FILE: &str = "students.dat";

// On-disk image of the original `Student` struct: i32 id, three 50-byte
// NUL-padded text slots, two alignment pad bytes, i32 total, i32 attended,
// one defaulter byte, three trailing pad bytes. Native byte order.
const FIELD_BYTES: usize = 50;
pub const RECORD_BYTES: usize = 168;

const OFF_ID: usize = 0;
const OFF_NAME: usize = 4;
const OFF_COURSE: usize = 54;
const OFF_PASSWORD: usize = 104;
const OFF_TOTAL: usize = 156;
const OFF_ATTENDED: usize = 160;
const OFF_DEFAULTER: usize = 164;

fn encode_text(out: &mut [u8], s: &str) {
    let bytes = s.as_bytes();
    // Keep the terminating NUL of the original layout: at most 49 content bytes.
    let n = bytes.len().min(FIELD_BYTES - 1);
    out[..n].copy_from_slice(&bytes[..n]);
}

fn decode_text(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

fn encode_record(rec: &StudentRecord) -> [u8; RECORD_BYTES] {
    let mut buf = [0u8; RECORD_BYTES];
    buf[OFF_ID..OFF_ID + 4].copy_from_slice(&rec.id.to_ne_bytes());
    encode_text(&mut buf[OFF_NAME..OFF_NAME + FIELD_BYTES], &rec.name);
    encode_text(&mut buf[OFF_COURSE..OFF_COURSE + FIELD_BYTES], &rec.course);
    encode_text(
        &mut buf[OFF_PASSWORD..OFF_PASSWORD + FIELD_BYTES],
        &rec.password,
    );
    buf[OFF_TOTAL..OFF_TOTAL + 4].copy_from_slice(&rec.total_classes.to_ne_bytes());
    buf[OFF_ATTENDED..OFF_ATTENDED + 4].copy_from_slice(&rec.attended_classes.to_ne_bytes());
    buf[OFF_DEFAULTER] = rec.is_defaulter as u8;
    buf
}

fn decode_i32(raw: &[u8]) -> i32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(raw);
    i32::from_ne_bytes(b)
}

fn decode_record(raw: &[u8]) -> StudentRecord {
    StudentRecord {
        id: decode_i32(&raw[OFF_ID..OFF_ID + 4]),
        name: decode_text(&raw[OFF_NAME..OFF_NAME + FIELD_BYTES]),
        course: decode_text(&raw[OFF_COURSE..OFF_COURSE + FIELD_BYTES]),
        password: decode_text(&raw[OFF_PASSWORD..OFF_PASSWORD + FIELD_BYTES]),
        total_classes: decode_i32(&raw[OFF_TOTAL..OFF_TOTAL + 4]),
        attended_classes: decode_i32(&raw[OFF_ATTENDED..OFF_ATTENDED + 4]),
        is_defaulter: raw[OFF_DEFAULTER] != 0,
    }
}

/// Rewrites the whole roster file. Called after every mutation and once at
/// shutdown; call sites ignore the result since persistence failure is
/// tolerated (the change stays in memory).
pub fn save(path: &Path, roster: &Roster) -> anyhow::Result<()> {
    let mut out = Vec::with_capacity(4 + roster.len() * RECORD_BYTES);
    out.extend_from_slice(&(roster.len() as i32).to_ne_bytes());
    for rec in roster.records() {
        out.extend_from_slice(&encode_record(rec));
    }
    std::fs::write(path, out)
        .with_context(|| format!("failed to write {}", path.to_string_lossy()))
}

/// Tolerant load: a missing file reads as an empty roster, a count outside
/// 0..=100 resets to empty, and a truncated tail keeps the complete records
/// read so far. Defaulter flags are recomputed from the counters rather
/// than trusted from disk.
pub fn load(path: &Path) -> Roster {
    let Ok(raw) = std::fs::read(path) else {
        return Roster::new();
    };
    if raw.len() < 4 {
        return Roster::new();
    }
    let count = decode_i32(&raw[..4]);
    if count < 0 || count as usize > MAX_STUDENTS {
        return Roster::new();
    }

    let mut records = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let start = 4 + i * RECORD_BYTES;
        let Some(chunk) = raw.get(start..start + RECORD_BYTES) else {
            break;
        };
        records.push(decode_record(chunk));
    }
    let mut roster = Roster::from_records(records);
    roster.recompute_flags();
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "attendanced-{}-{}.dat",
            name,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ))
    }

    fn sample_roster(n: usize) -> Roster {
        let mut roster = Roster::new();
        for i in 1..=n as i32 {
            roster
                .add(&i.to_string(), &format!("Student {i}"), "Physics", "pw")
                .expect("add");
        }
        roster
    }

    #[test]
    fn record_width_matches_original_struct() {
        let roster = sample_roster(3);
        let path = temp_file("width");
        save(&path, &roster).expect("save");
        let raw = std::fs::read(&path).expect("read back");
        assert_eq!(raw.len(), 4 + 3 * RECORD_BYTES);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn roundtrip_preserves_fields_and_order() {
        for n in [0usize, 1, 5, MAX_STUDENTS] {
            let mut roster = sample_roster(n);
            if n > 0 {
                roster.mark_present(0);
                roster.mark_absent(0);
            }
            let path = temp_file("roundtrip");
            save(&path, &roster).expect("save");
            let loaded = load(&path);
            assert_eq!(loaded, roster, "size {n}");
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let path = temp_file("missing");
        assert!(load(&path).is_empty());
    }

    #[test]
    fn out_of_range_count_resets_to_empty() {
        let path = temp_file("corrupt");
        std::fs::write(&path, (-1i32).to_ne_bytes()).expect("write");
        assert!(load(&path).is_empty());
        std::fs::write(&path, 101i32.to_ne_bytes()).expect("write");
        assert!(load(&path).is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn truncated_tail_keeps_complete_records() {
        let roster = sample_roster(2);
        let path = temp_file("truncated");
        save(&path, &roster).expect("save");
        let mut raw = std::fs::read(&path).expect("read");
        raw.truncate(4 + RECORD_BYTES + 10);
        std::fs::write(&path, raw).expect("rewrite");
        let loaded = load(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0).expect("first").id, 1);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn defaulter_flag_recomputed_on_load() {
        let mut roster = sample_roster(1);
        for _ in 0..2 {
            roster.mark_absent(0);
        }
        let path = temp_file("flags");
        save(&path, &roster).expect("save");
        // Flip the stored byte; load must not trust it.
        let mut raw = std::fs::read(&path).expect("read");
        raw[4 + OFF_DEFAULTER] = 0;
        std::fs::write(&path, raw).expect("rewrite");
        assert!(load(&path).get(0).expect("first").is_defaulter);
        let _ = std::fs::remove_file(path);
    }
}
