use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;
use std::{io, time::Duration};

use triage_queue::{Patient, TriageQueue, Urgency};

/// Snapshot of the waiting room to share with the UI
#[derive(Default, Clone)]
struct WardSnapshot {
    /// Waiting patients per tier, most urgent first
    tier_depths: [u64; 4],
    /// Name of the patient the heap would serve next
    next_up: Option<String>,
}

struct SharedStats {
    ops_count: AtomicU64,
    waiting: AtomicU64,
    served: AtomicU64,
    // The actual ward data (protected by a lock)
    snapshot: RwLock<WardSnapshot>,
}

impl SharedStats {
    fn new() -> Self {
        Self {
            ops_count: AtomicU64::new(0),
            waiting: AtomicU64::new(0),
            served: AtomicU64::new(0),
            snapshot: RwLock::new(WardSnapshot::default()),
        }
    }
}

/// Skewed tier draw: most walk-ins are low urgency
fn draw_urgency(r: u64) -> Urgency {
    match r % 10 {
        0 => Urgency::Immediate,
        1 | 2 => Urgency::Emergency,
        3 | 4 | 5 => Urgency::Urgent,
        _ => Urgency::Minimal,
    }
}

/// Helper to generate the ASCII bar block, one line per tier
fn render_tier_bars(depths: &[u64; 4]) -> String {
    let mut out = String::new();
    let max_depth = depths.iter().copied().max().unwrap_or(1).max(1) as f32;

    for (tier, depth) in Urgency::ALL.iter().zip(depths.iter()) {
        let bar_len = ((*depth as f32 / max_depth) * 30.0) as usize;
        let bar = "█".repeat(bar_len);
        out.push_str(&format!("{:>9} {} {:<6}\n", tier.label(), bar, depth));
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Shared state
    let stats = Arc::new(SharedStats::new());
    let stats_clone = stats.clone();

    // Spawn ward thread (synthetic admissions and discharges)
    thread::spawn(move || {
        let mut queue = TriageQueue::with_capacity(200_000);
        let mut rng = 12345u64; // Simple LCG for speed
        let mut patient_id = 0u64;
        let mut served = 0u64;
        let mut loop_count = 0u64;

        loop {
            // Batch processing to reduce atomic contention overhead
            const BATCH_SIZE: u64 = 1000;

            for _ in 0..BATCH_SIZE {
                rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
                // Use high 32 bits for better randomness (LCG low bits are poor)
                let r = rng >> 32;

                // 60% admissions, 40% service calls
                if queue.is_empty() || r % 5 < 3 {
                    patient_id += 1;
                    let urgency = draw_urgency(r / 5);
                    queue.add(Patient::new(format!("Patient-{patient_id}"), urgency));
                } else if queue.remove_next().is_ok() {
                    served += 1;
                }
            }

            loop_count += 1;

            // Update stats
            stats_clone.ops_count.fetch_add(BATCH_SIZE, Ordering::Relaxed);
            stats_clone.waiting.store(queue.len() as u64, Ordering::Relaxed);
            stats_clone.served.store(served, Ordering::Relaxed);

            // Publish snapshot (only once per few batches; the tier scan
            // walks the whole heap)
            if loop_count % 20 == 0 {
                if let Ok(mut write_guard) = stats_clone.snapshot.write() {
                    let mut depths = [0u64; 4];
                    for patient in queue.iter() {
                        depths[(patient.urgency().code() - 1) as usize] += 1;
                    }
                    write_guard.tier_depths = depths;
                    write_guard.next_up =
                        queue.peek_next().ok().map(|p| p.name().to_string());
                }
            }

            // Hard reset for the demo loop if the ward overflows
            if queue.len() > 150_000 {
                queue = TriageQueue::with_capacity(200_000);
            }
        }
    });

    // Run TUI loop
    let mut last_ops = 0;
    let mut last_time = std::time::Instant::now();
    let mut throughput = 0.0;

    loop {
        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') {
                    break;
                }
            }
        }

        // Calculate throughput
        let now = std::time::Instant::now();
        if now.duration_since(last_time).as_secs_f64() >= 1.0 {
            let current_ops = stats.ops_count.load(Ordering::Relaxed);
            throughput = (current_ops - last_ops) as f64;
            last_ops = current_ops;
            last_time = now;
        }

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3), // Header
                        Constraint::Min(8),    // Ward
                        Constraint::Length(7), // Stats
                    ]
                    .as_ref(),
                )
                .split(f.size());

            // 1. Header
            let header = Block::default()
                .borders(Borders::ALL)
                .title("TRIAGE-QUEUE Ward Demo");
            let title = Paragraph::new("Synthetic admissions | Press 'q' to quit")
                .block(header)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(title, chunks[0]);

            // 2. Ward depth per tier
            let snapshot = stats.snapshot.read().unwrap();
            let bars = render_tier_bars(&snapshot.tier_depths);
            let ward_widget = Paragraph::new(bars).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("WAITING BY TIER")
                    .style(Style::default().fg(Color::Green)),
            );
            f.render_widget(ward_widget, chunks[1]);

            // 3. Stats
            let ops_fmt = if throughput > 1_000_000.0 {
                format!("{:.2} M", throughput / 1_000_000.0)
            } else {
                format!("{:.0} k", throughput / 1_000.0)
            };

            let waiting = stats.waiting.load(Ordering::Relaxed);
            let served = stats.served.load(Ordering::Relaxed);
            let next_up = snapshot.next_up.as_deref().unwrap_or("-");

            let stats_text = format!(
                "Throughput: {ops_fmt} ops/sec\nWaiting: {waiting}\nServed: {served}\nNext up: {next_up}"
            );

            let stats_block = Paragraph::new(stats_text)
                .block(Block::default().borders(Borders::ALL).title("Ward Telemetry"))
                .style(Style::default().fg(Color::Yellow));
            f.render_widget(stats_block, chunks[2]);
        })?;
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}
