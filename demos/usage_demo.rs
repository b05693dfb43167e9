//! Demo application: a small simulated shop recorded from worker threads.
//!
//! Run with:
//! ```bash
//! RUST_LOG=chiamate=debug cargo run --example usage_demo --features demo -- --help
//! ```

use chiamate::config::RecorderConfig;
use chiamate::observers::json::JsonObserver;
use chiamate::observers::table::{TableObserver, TableStyle};
use chiamate::observers::text::TextObserver;
use chiamate::recorder::Recorder;
use chiamate::reporter::Reporter;
use chiamate::{record, MethodKey};
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use std::thread;
use tracing_subscriber::EnvFilter;

/// Extra output printed before the shutdown summary.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preview {
    /// Counts as a table
    Table,
    /// Snapshot as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "usage_demo")]
#[command(about = "Record method calls from worker threads and print the usage summary")]
struct Args {
    /// Number of worker threads
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Calls made by each worker
    #[arg(short, long, default_value_t = 50)]
    calls: usize,

    /// Recent calls retained per method
    #[arg(long, default_value_t = 5)]
    history: usize,

    /// Hide per-call history lines in the summary
    #[arg(long)]
    no_history: bool,

    /// Print a preview of the snapshot before shutdown
    #[arg(short, long, value_enum)]
    preview: Option<Preview>,
}

struct Shop {
    recorder: Arc<Recorder>,
}

impl Shop {
    fn add_item(&self, item: &str, qty: u32) {
        record!(self.recorder, MethodKey::method("Shop", "add_item"), item, qty);
    }

    fn remove_item(&self, item: &str) {
        record!(self.recorder, MethodKey::method("Shop", "remove_item"), item);
    }

    fn checkout(&self, worker: usize) {
        record!(self.recorder, MethodKey::method("Shop", "checkout"), worker);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let recorder = Arc::new(Recorder::with_config(
        RecorderConfig::new().history_capacity(args.history),
    ));
    let _report = Reporter::stdout(Arc::clone(&recorder))
        .with_observer(TextObserver::new().show_history(!args.no_history))
        .guard();

    let items = ["apple", "pear", "kiwi", "plum"];
    let calls = args.calls;
    let handles: Vec<_> = (0..args.threads)
        .map(|worker| {
            let shop = Shop {
                recorder: Arc::clone(&recorder),
            };
            thread::spawn(move || {
                for i in 0..calls {
                    let item = items[(worker + i) % items.len()];
                    shop.add_item(item, (i % 3 + 1) as u32);
                    if i % 4 == 0 {
                        shop.remove_item(item);
                    }
                }
                shop.checkout(worker);
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("worker panicked");
        }
    }

    match args.preview {
        Some(Preview::Table) => {
            let table = TableObserver::new()
                .with_style(TableStyle::Rounded)
                .with_last_call(false)
                .render(&recorder.snapshot());
            println!("{table}\n");
        }
        Some(Preview::Json) => match JsonObserver::new()
            .pretty(true)
            .include_history(false)
            .to_json(&recorder.snapshot())
        {
            Ok(json) => println!("{json}\n"),
            Err(err) => tracing::warn!(error = %err, "json preview failed"),
        },
        None => {}
    }
}
