use std::sync::Arc;

use clap::{Arg, Command};
use traductor::{
    Backend, BackendSet, MockMode, MockTranslator, TranslateError, TranslationService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("traductor")
        .version("0.1.0")
        .about("Translate text from the command line")
        .arg(
            Arg::new("text")
                .help("Text to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("target")
                .help("Target language code (e.g., es, fr, de)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Source language code, or 'auto' to detect (default: auto)")
                .default_value("auto"),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .short('b')
                .help("Backend to use: google, microsoft or mymemory (default: google)")
                .default_value("google"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the offline mock backend instead of a real provider")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show the request details before the result")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let text = matches.get_one::<String>("text").unwrap();
    let target = matches.get_one::<String>("target").unwrap();
    let source = matches.get_one::<String>("source").unwrap();
    let backend = Backend::from_name(matches.get_one::<String>("backend").unwrap());
    let use_mock = matches.get_flag("mock");
    let verbose = matches.get_flag("verbose");

    if verbose {
        println!("📝 Text: \"{}\"", text);
        println!("🌍 {} → {}", source, target);
        println!("🔌 Backend: {}", backend);
        println!();
    }

    let backends = if use_mock {
        BackendSet::uniform(Arc::new(MockTranslator::new(MockMode::Suffix)))
    } else {
        BackendSet::from_env()?
    };
    let service = TranslationService::new(backends);

    match service.translate(text, source, target, backend).await {
        Ok(translated) => {
            println!("{}", translated);
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ Translation failed: {}", err);
            if matches!(err, TranslateError::Config { .. }) {
                eprintln!("   Set the backend's API key environment variable,");
                eprintln!("   or use --mock to run without a provider");
            }
            Err(err.into())
        }
    }
}
