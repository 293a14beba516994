use std::time::Instant;

use log_producer::generator::RecordGenerator;
use log_producer::memory_sink::MemorySink;
use log_producer::producer::LogProducer;
use tokio::time::Duration;

#[tokio::main]
async fn main() {
    let sink = MemorySink::new();
    let generator = RecordGenerator::with_seed("throughput", Some(0));
    let mut producer = LogProducer::new(generator, Box::new(sink.clone()), Duration::from_millis(1));

    let n: u64 = 100_000;
    let start = Instant::now();

    for _ in 0..n {
        if let Err(e) = producer.tick().await {
            eprintln!("tick failed: {e}");
            return;
        }
    }

    let elapsed = start.elapsed();
    println!("generated {} records in {:?} (~{:.0} rec/s), {} buffered",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64(),
        sink.len()
    );
}
