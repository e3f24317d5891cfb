use log::info;
use wordpane::config::Config;
use wordpane::lookup::LookupManager;
use wordpane::render::render_lines;

fn load_config() -> Config {
    let Some(config_dir) = dirs::config_dir() else {
        info!("no user config directory; using built-in defaults");
        return Config::default();
    };
    let config_file = config_dir.join("wordpane.toml");

    if !config_file.exists() {
        let default_config = Config::default();
        info!(
            "Config file not found. Creating default config. path={}",
            config_file.display()
        );
        match toml::to_string(&default_config) {
            Ok(serialized) => {
                if let Err(error) = std::fs::write(&config_file, serialized) {
                    info!("could not write default config: {error}");
                }
            }
            Err(error) => info!("could not serialize default config: {error}"),
        }
        return default_config;
    }

    match std::fs::read_to_string(&config_file) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|error| {
            info!(
                "unreadable config at {}; using defaults: {error}",
                config_file.display()
            );
            Config::default()
        }),
        Err(error) => {
            info!("could not read config: {error}");
            Config::default()
        }
    }
}

fn main() {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    clog.init();

    std::panic::set_hook(Box::new(|panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
    }));

    let words: Vec<String> = std::env::args().skip(1).collect();
    if words.is_empty() {
        eprintln!("Usage: wordpane <word>...");
        std::process::exit(1);
    }

    let manager = LookupManager::new(&load_config());
    let mut missing = false;
    for word in &words {
        match manager.fetch(word) {
            Some(record) => {
                for line in render_lines(&record) {
                    println!("{line}");
                }
            }
            None => {
                println!("### {word}");
                println!();
                println!("no result");
                println!();
                missing = true;
            }
        }
    }
    if missing {
        std::process::exit(2);
    }
}
