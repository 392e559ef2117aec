use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(record) = bagtag::decode_bytes(data) {
                // Reserved bits are dropped, so compare records rather than bytes.
                let tag = bagtag::encode(&record).expect("decoded record re-encodes");
                assert_eq!(bagtag::decode_bytes(tag.as_bytes()).ok(), Some(record));
            }
        });
    }
}
