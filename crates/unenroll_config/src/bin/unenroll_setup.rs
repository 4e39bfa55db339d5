use std::io;
use std::path::PathBuf;
use unenroll_config::setup::{collect_answers, write_env_file, SetupError};

fn main() {
    // Target file: first argument, or `.env` in the working directory.
    let target = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".env"));

    println!("🚀 Apollo Auto Remove - Configuration Setup\n");
    println!("This script will help you configure your Apollo API credentials.\n");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let result = collect_answers(&mut input, &mut output)
        .and_then(|answers| write_env_file(&target, &answers));

    match result {
        Ok(()) => {
            println!("\n✅ Configuration saved to {}", target.display());
            println!("🎉 Setup complete! You can now start the server with:");
            println!("   cargo run -p unenroll-backend");
        }
        Err(SetupError::MissingApiKey) => {
            println!("❌ {}", SetupError::MissingApiKey);
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("❌ Error during setup: {}", err);
            std::process::exit(1);
        }
    }
}
