use anyhow::{Context, anyhow};
use std::sync::mpsc;
use std::thread;
use tracing::info;
use weir_core::aggregate::Aggregator;
use weir_core::conf::{SinkConfig, SinkKind, WeirConfig};
use weir_core::event::Event;
use weir_core::harvest;
use weir_core::sink::{ChannelSink, EventSink, JsonLinesSink};
use weir_core::source::{SourceSession, TextFeed};

/// Bounded handoff between the harvest thread and the sink loop. Small on
/// purpose: a stalled sink should backpressure the tail, not grow a queue.
const EVENT_QUEUE_DEPTH: usize = 256;

/// Wire the feed, the aggregation engine, and the sink together and run
/// until the feed stops.
///
/// Shutdown ordering matters: CTRL-C closes the feed session, the harvest
/// loop drains out and drops its channel sender, the sink loop sees the
/// disconnect, and only then is the sink closed. Closing the sink under a
/// still-emitting loop would lose events.
pub fn run(config: WeirConfig) -> anyhow::Result<()> {
    let mut session = TextFeed::open(config.path.as_deref(), config.timeout)
        .context("failed to open log feed")?;

    let closer = session.closer();
    ctrlc::set_handler(move || {
        info!("shutdown requested; closing log feed");
        closer.close();
    })
    .context("failed to install shutdown handler")?;

    let (tx, rx) = mpsc::sync_channel::<Event>(EVENT_QUEUE_DEPTH);

    let mut aggregator = Aggregator::with_directions(config.client, config.backend);
    let harvester = thread::Builder::new()
        .name("harvest".to_string())
        .spawn(move || {
            let mut sink = ChannelSink::new(tx);
            harvest::run(&mut session, &mut aggregator, &mut sink)
        })
        .context("failed to spawn harvest thread")?;

    info!("weir is running; stop with CTRL-C");

    // Sink loop: ends when the harvest side drops the sender.
    let mut sink = build_sink(&config.sink)?;
    for event in rx {
        sink.publish(event);
    }
    sink.close();

    match harvester.join() {
        Ok(Ok(())) => {
            info!("harvest finished");
            Ok(())
        }
        Ok(Err(err)) => Err(err).context("harvest halted"),
        Err(_) => Err(anyhow!("harvest thread panicked")),
    }
}

fn build_sink(config: &SinkConfig) -> anyhow::Result<Box<dyn EventSink>> {
    match config.kind {
        SinkKind::Stdout => Ok(Box::new(JsonLinesSink::stdout())),
        SinkKind::File => {
            let path = config
                .path
                .as_deref()
                .ok_or_else(|| anyhow!("file sink requires a path"))?;
            let sink = JsonLinesSink::file(path)
                .with_context(|| format!("failed to open sink file {}", path.display()))?;
            Ok(Box::new(sink))
        }
    }
}
