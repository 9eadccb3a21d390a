//! Shared fixture builders for the salvage benches and the fixture
//! generator.

#![allow(clippy::pedantic)]

use salvage_encoder::ArchiveBuilder;
use salvage_types::{DateTime, ObjectId, Record, Value};

/// Deterministic ObjectId for fixture record `n`.
pub fn object_id(n: u32) -> ObjectId {
    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&1_600_000_000u32.to_be_bytes());
    bytes[8..].copy_from_slice(&n.to_be_bytes());
    ObjectId::from_bytes(bytes)
}

/// A dump shaped like a small application database: one metadata
/// prelude, then `users` users, a company and landing per ten users,
/// roles, newsletters and their join records, separated by the block
/// terminators a real archive carries.
pub fn application_dump(users: u32) -> ArchiveBuilder {
    let mut builder = ArchiveBuilder::new();
    builder.add_dump_header().add_record(
        Record::new()
            .with("db", "app")
            .with("collection", "users")
            .with(
                "metadata",
                Record::new().with(
                    "indexes",
                    vec![Value::from(Record::new().with("v", 2).with("name", "_id_"))],
                ),
            ),
    );
    builder.add_block_terminator();

    let mut next_id = 0u32;
    let mut id = || {
        next_id += 1;
        object_id(next_id)
    };

    for role in ["admin", "editor", "viewer"] {
        builder.add_record(Record::new().with("_id", id()).with("name", role));
    }
    for n in 0..users {
        builder.add_record(
            Record::new()
                .with("_id", id())
                .with("email", format!("user{n}@example.com"))
                .with("first_name", format!("User {n}"))
                .with("created_at", DateTime::from_millis(1_600_000_000_000 + i64::from(n) * 60_000))
                .with("roles", vec![Value::from("viewer")]),
        );
        if n % 10 == 0 {
            builder
                .add_record(
                    Record::new()
                        .with("_id", id())
                        .with("name", format!("Company {n}"))
                        .with("owner_id", object_id(n)),
                )
                .add_record(
                    Record::new()
                        .with("_id", id())
                        .with("domain_name", format!("c{n}.example.com"))
                        .with("template_config", Record::new().with("theme", "dark")),
                );
        }
    }
    builder.add_block_terminator();
    builder
        .add_record(
            Record::new()
                .with("_id", id())
                .with("subject", "Welcome")
                .with("message", "Hello!"),
        )
        .add_record(
            Record::new()
                .with("_id", id())
                .with("newsletter_id", object_id(1))
                .with("user_id", object_id(2)),
        );
    builder
}
