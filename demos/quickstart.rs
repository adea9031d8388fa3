use chrono::{Datelike, Utc};
use flexi_logger::Logger;
use miqat::{
    AsrJuristic, EngineConfig, HighLatitudeRule, Location, Method, Prayer, PrayerEngine,
    TimeFormat,
};

fn main() {
    // RUST_LOG=miqat=debug shows the solver stages.
    let _logger = Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e));

    let engine = PrayerEngine::new(
        EngineConfig::default()
            .with_method(Method::Karachi)
            .with_asr_juristic(AsrJuristic::Hanafi)
            .with_high_latitude(HighLatitudeRule::AngleBased),
    );
    let rawalpindi = Location::new(33.573_681_634_123_95, 73.173_086_612_440_54, 5.0);

    let today = Utc::now().date_naive();
    let times = engine.compute_for_date(today, &rawalpindi);
    let formatted = times.format(TimeFormat::Time24);

    println!("{} ({}), {today}", engine.config().method, engine.config().method.description());
    for prayer in Prayer::ALL {
        println!("{:>8}: {}", prayer.to_string(), formatted[prayer.index()]);
    }

    log::info!(
        "day {} of {}: Dhuhr at {:?} h",
        today.ordinal(),
        today.year(),
        times[Prayer::Dhuhr].hour()
    );
}
