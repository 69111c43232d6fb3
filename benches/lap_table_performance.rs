use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lapboard::dashboard::commentary::{CommentaryBudget, CommentaryEmitter};
use lapboard::dashboard::lap_table::{BuildResult, LapTableBuilder, pace_series};
use lapboard::LapRecord;
use std::time::Duration;

const DRIVERS: [&str; 20] = [
    "ALB", "ALO", "BOT", "GAS", "HAM", "HUL", "LEC", "MAG", "NOR", "OCO", "PER", "PIA", "RIC",
    "RUS", "SAI", "SAR", "STR", "TSU", "VER", "ZHO",
];

/// A full race distance for a full grid
fn create_race_laps(laps_per_driver: u32) -> Vec<LapRecord> {
    let mut laps = Vec::new();
    for lap_number in 1..=laps_per_driver {
        for (i, driver) in DRIVERS.iter().enumerate() {
            laps.push(LapRecord {
                driver: driver.to_string(),
                lap_number,
                lap_time: Some(Duration::from_millis(78_000 + (i as u64 * 97) + lap_number as u64)),
                compound: Some(if lap_number < 30 { "MEDIUM" } else { "HARD" }.to_string()),
                tyre_life: Some(((lap_number - 1) % 30 + 1) as f64),
                ..Default::default()
            });
        }
    }
    laps
}

fn bench_lap_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("lap_table");
    let laps = create_race_laps(78);
    let builder = LapTableBuilder::new(&laps);

    group.bench_function("drivers", |b| {
        b.iter(|| black_box(builder.drivers()));
    });

    group.bench_function("build_single_driver", |b| {
        b.iter(|| black_box(builder.build(black_box("VER"))));
    });

    group.bench_function("pace_series", |b| {
        let lap_times = builder.lap_time_series("VER");
        b.iter(|| black_box(pace_series(&lap_times)));
    });

    group.finish();
}

fn bench_commentary(c: &mut Criterion) {
    let mut group = c.benchmark_group("commentary");
    let laps = create_race_laps(78);
    let BuildResult::Rows(rows) = LapTableBuilder::new(&laps).build("LEC") else {
        panic!("expected rows for LEC");
    };
    let emitter = CommentaryEmitter::new(true);
    let budget = CommentaryBudget::new(20).unwrap();

    group.bench_function("emit_full_budget", |b| {
        b.iter(|| black_box(emitter.emit(&rows, "LEC", budget)));
    });

    group.finish();
}

criterion_group!(benches, bench_lap_table, bench_commentary);
criterion_main!(benches);
