use devcycle::*;
use log::kv::Key;
use log::{Level, LevelFilter, Log, Metadata, Record};

#[tokio::main]
async fn main() {
    // Info level logging shows the outcome of each request to the Bucketing API.
    log::set_max_level(LevelFilter::Info);
    log::set_logger(&PrintLog {}).unwrap();

    let sdk_key = std::env::var("DEVCYCLE_SERVER_SDK_KEY").unwrap_or("dvc_server_key".to_owned());
    let client = Client::builder(sdk_key.as_str()).build().unwrap();

    let user = User::new("#SOME-USER-ID#")
        .email("devcycle@example.com")
        .custom("plan", "enterprise");

    let variable = client.variable(&user, "new-checkout", false).await.unwrap();
    println!(
        "new-checkout: {} (defaulted: {})",
        variable.value, variable.is_defaulted
    );

    let max_items = client.variable_value(&user, "max-items", 10).await.unwrap();
    println!("max-items: {max_items}");

    for (key, variable) in client.all_variables(&user).await.unwrap_or_default() {
        println!("{key} = {}", variable.value);
    }

    let sent = client
        .track(&user, Event::new("demo-run").value(1.0))
        .await
        .unwrap_or(false);
    println!("event sent: {sent}");
}

// Example log implementation.
pub struct PrintLog {}

impl Log for PrintLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target().contains("devcycle")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        match record.key_values().get(Key::from("event_id")) {
            Some(event_id) => println!("{level} [{event_id}] {}", record.args()),
            None => println!("{level} {}", record.args()),
        }
    }

    fn flush(&self) {}
}
