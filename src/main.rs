use signage::{ChannelConfig, Reactor};
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config_path = std::env::args().nth(1).map(PathBuf::from);
	let channel = ChannelConfig::load(config_path.as_deref())?;

	let mut reactor = Reactor::new(channel.build_deck(), &channel);
	reactor.start();

	let tick = channel.tick;
	let mut last = Instant::now();
	loop {
		std::thread::sleep(tick);
		let now = Instant::now();
		reactor.tick(now, now - last);
		last = now;
	}
}
