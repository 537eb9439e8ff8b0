use hdrhistogram::Histogram;
use std::time::Instant;

use triage_queue::{Patient, TriageQueue, Urgency};

/// Pin the current thread to the last available CPU core.
///
/// The last core is typically the quietest; pinning keeps the percentile
/// tails honest.
fn pin_to_core() {
    if let Some(core_ids) = core_affinity::get_core_ids() {
        if let Some(last_core) = core_ids.last() {
            core_affinity::set_for_current(*last_core);
        }
    }
}

fn report(label: &str, histogram: &Histogram<u64>) {
    println!("\n=== {label} latency (ns) ===");
    println!("Min:    {:6} ns", histogram.min());
    println!("P50:    {:6} ns", histogram.value_at_quantile(0.50));
    println!("P90:    {:6} ns", histogram.value_at_quantile(0.90));
    println!("P99:    {:6} ns", histogram.value_at_quantile(0.99));
    println!("P99.9:  {:6} ns", histogram.value_at_quantile(0.999));
    println!("Max:    {:6} ns", histogram.max());
}

fn main() {
    println!("Preparing Latency Benchmark...");

    pin_to_core();

    const ITERATIONS: u64 = 1_000_000;

    let mut queue = TriageQueue::with_capacity(ITERATIONS as usize);
    let mut admit = Histogram::<u64>::new_with_bounds(1, 100_000, 3).unwrap();
    let mut serve = Histogram::<u64>::new_with_bounds(1, 100_000, 3).unwrap();

    println!("Admitting {ITERATIONS} patients...");

    let mut total_duration = std::time::Duration::new(0, 0);

    for i in 0..ITERATIONS {
        let urgency = Urgency::from_code((i % 4) as u8 + 1).unwrap();
        let patient = Patient::new("Load Test Patient", urgency);

        // Critical measurement section
        let start = Instant::now();
        std::hint::black_box(queue.add(patient));
        let elapsed = start.elapsed();

        // Outliers beyond the 100us bound are simply dropped
        admit.record(elapsed.as_nanos() as u64).unwrap_or(());
        total_duration += elapsed;
    }

    println!("Serving {ITERATIONS} patients...");

    while !queue.is_empty() {
        let start = Instant::now();
        std::hint::black_box(queue.remove_next().unwrap());
        let elapsed = start.elapsed();

        serve.record(elapsed.as_nanos() as u64).unwrap_or(());
        total_duration += elapsed;
    }

    println!("\n=== Summary ===");
    println!("Total Ops:  {}", ITERATIONS * 2);
    println!(
        "Throughput: {:.2} ops/sec",
        (ITERATIONS * 2) as f64 / total_duration.as_secs_f64()
    );
    report("admit", &admit);
    report("serve", &serve);
}
