use criterion::{criterion_group, criterion_main, Criterion};
use scenesync_crdt::MergeEngine;
use scenesync_types::{ComponentId, CrdtMessage, EntityId, PayloadData, Timestamp};
use std::hint::black_box;

fn component_writes(count: u32) -> Vec<CrdtMessage> {
    (0..count)
        .map(|i| CrdtMessage::ComponentData {
            component_id: ComponentId::new(i % 8),
            entity_id: EntityId::from_parts((i % 64) as u16, 0),
            timestamp: Timestamp::new(i / 64 + 1),
            data: PayloadData::Number(f64::from(i)),
        })
        .collect()
}

fn merge_throughput(c: &mut Criterion) {
    let messages = component_writes(1000);
    c.bench_function("process_1000_component_writes", |b| {
        b.iter(|| {
            let mut engine = MergeEngine::new();
            for message in &messages {
                let _ = engine.process_message(black_box(message));
            }
            engine
        })
    });
}

fn tie_break_path(c: &mut Criterion) {
    // every message lands on the same cell with the same timestamp, so the
    // payload comparator runs on each merge
    let messages: Vec<CrdtMessage> = (0..1000u32)
        .map(|i| CrdtMessage::ComponentData {
            component_id: ComponentId::new(0),
            entity_id: EntityId::from_parts(0, 0),
            timestamp: Timestamp::new(1),
            data: PayloadData::Bytes(i.to_be_bytes().to_vec()),
        })
        .collect();

    c.bench_function("tie_break_1000_equal_timestamps", |b| {
        b.iter(|| {
            let mut engine = MergeEngine::new();
            for message in &messages {
                let _ = engine.process_message(black_box(message));
            }
            engine
        })
    });
}

fn tombstone_checks(c: &mut Criterion) {
    let mut engine = MergeEngine::new();
    for slot in 0..256u16 {
        let _ = engine.create_delete_entity_event(EntityId::from_parts(slot, 4));
    }
    let probe = CrdtMessage::ComponentData {
        component_id: ComponentId::new(0),
        entity_id: EntityId::from_parts(128, 2),
        timestamp: Timestamp::new(1),
        data: PayloadData::None,
    };

    c.bench_function("discard_write_against_tombstone", |b| {
        b.iter(|| engine.process_message(black_box(&probe)))
    });
}

criterion_group!(benches, merge_throughput, tie_break_path, tombstone_checks);
criterion_main!(benches);
