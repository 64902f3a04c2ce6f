use anyhow::Result;
use clap::{Parser, Subcommand};
use muse_core::models::{MAX_MAX_TOKENS, MAX_TEMPERATURE, MIN_MAX_TOKENS, MIN_TEMPERATURE};
use muse_core::{
    ChatType, Config, HttpCompletionClient, ModelId, PRESETS, PromptConsole, presets,
};
use std::io::Write;
use tracing::info;

#[derive(Parser)]
#[command(name = "muse")]
#[command(about = "AI prompt console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive prompt console (default)
    Console,

    /// Submit a single prompt and print the response
    Ask {
        /// Prompt text
        prompt: String,

        /// Chat type: chat, completion, analysis or generation
        #[arg(short = 't', long = "type", default_value = "chat")]
        chat_type: ChatType,

        /// Model: gpt-3.5-turbo, gpt-4 or gpt-4-turbo
        #[arg(short, long, default_value = "gpt-3.5-turbo")]
        model: ModelId,

        /// Maximum response tokens (1-4000)
        #[arg(long, default_value = "1000")]
        max_tokens: u32,

        /// Sampling temperature (0.0-2.0)
        #[arg(long, default_value = "0.7")]
        temperature: f32,
    },

    /// List the canned example prompts
    Presets,

    /// List selectable chat types and models
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (stderr, so the console output stays clean)
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    // Load .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Ask {
            prompt,
            chat_type,
            model,
            max_tokens,
            temperature,
        }) => {
            ask_command(prompt, chat_type, model, max_tokens, temperature).await?;
        }
        Some(Commands::Presets) => {
            presets_command();
        }
        Some(Commands::Models) => {
            models_command();
        }
        Some(Commands::Console) | None => {
            console_command().await?;
        }
    }

    Ok(())
}

async fn ask_command(
    prompt: String,
    chat_type: ChatType,
    model: ModelId,
    max_tokens: u32,
    temperature: f32,
) -> Result<()> {
    let config = Config::from_env()?;
    info!("Completion function: {}", config.function_url());

    let mut console = PromptConsole::new(HttpCompletionClient::new(config));
    console.set_chat_type(chat_type);
    console.set_model(model);
    console.set_max_tokens(max_tokens);
    console.set_temperature(temperature);
    console.set_prompt(prompt);

    println!("AI is thinking...");
    let content = console.submit().await?;

    println!("AI response generated successfully");
    println!("\n=== AI Response ===\n");
    println!("{}", content);

    Ok(())
}

async fn console_command() -> Result<()> {
    let config = Config::from_env()?;
    info!("Completion function: {}", config.function_url());

    let mut console = PromptConsole::new(HttpCompletionClient::new(config));

    println!("\n=== AI Prompt Console ===\n");
    print_settings(&console);
    println!();
    println!("Type a prompt and press Enter to generate, :help lists commands.");
    println!();

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            if !handle_command(command, &mut console).await {
                break;
            }
            continue;
        }

        console.set_prompt(line);
        generate(&mut console).await;
    }

    Ok(())
}

/// Run one console command line; returns false when the session should end
async fn handle_command(command: &str, console: &mut PromptConsole<HttpCompletionClient>) -> bool {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "help" | "h" => print_help(),
        "quit" | "q" | "exit" => return false,
        "settings" => print_settings(console),
        "presets" => presets_command(),
        "preset" | "p" => preset_command(arg, console),
        "send" | "s" => generate(console).await,
        "clear" => {
            console.clear();
            println!("Console cleared");
        }
        "type" | "t" => match arg.parse::<ChatType>() {
            Ok(chat_type) => {
                console.set_chat_type(chat_type);
                println!(
                    "Chat type: {} - {}",
                    chat_type.label(),
                    chat_type.description()
                );
            }
            Err(e) => println!("{}", e),
        },
        "model" | "m" => match arg.parse::<ModelId>() {
            Ok(model) => {
                console.set_model(model);
                println!("Model: {}", model.label());
            }
            Err(e) => println!("{}", e),
        },
        "tokens" => match arg.parse::<u32>() {
            Ok(value) => {
                console.set_max_tokens(value);
                println!("Max tokens: {}", value);
            }
            Err(_) => println!(
                "Expected a number between {} and {}",
                MIN_MAX_TOKENS, MAX_MAX_TOKENS
            ),
        },
        "temp" => match arg.parse::<f32>() {
            Ok(value) => {
                console.set_temperature(value);
                println!("Temperature: {}", value);
            }
            Err(_) => println!(
                "Expected a number between {} and {}",
                MIN_TEMPERATURE, MAX_TEMPERATURE
            ),
        },
        other => println!("Unknown command :{}, :help lists commands", other),
    }

    true
}

/// Submit the current form and render the outcome without ending the session
async fn generate(console: &mut PromptConsole<HttpCompletionClient>) {
    println!("AI is thinking...");

    match console.submit().await {
        Ok(content) => {
            println!("AI response generated successfully");
            println!("\n=== AI Response ===\n");
            println!("{}", content);
            println!();
        }
        Err(err) => println!("{}", err),
    }
}

fn preset_command(arg: &str, console: &mut PromptConsole<HttpCompletionClient>) {
    let preset = match arg.parse::<usize>() {
        Ok(index) => presets::nth(index),
        Err(_) => presets::find(arg),
    };

    let Some(preset) = preset else {
        println!("No such preset, :presets lists them");
        return;
    };

    if console.apply_preset(preset) {
        println!("{}: {}", preset.title, preset.prompt);
        println!(
            "({} characters, :send to generate)",
            console.form().prompt.chars().count()
        );
    } else {
        println!("Still generating the previous response");
    }
}

fn print_settings(console: &PromptConsole<HttpCompletionClient>) {
    let form = console.form();

    println!("Settings:");
    println!(
        "  Chat type: {} - {}",
        form.chat_type.label(),
        form.chat_type.description()
    );
    println!("  Model: {}", form.model.label());
    println!("  Max tokens: {}", form.max_tokens);
    println!("  Temperature: {}", form.temperature);

    if form.prompt.is_empty() {
        println!("  Prompt: (empty)");
    } else {
        println!(
            "  Prompt: {} ({} characters)",
            form.prompt,
            form.prompt.chars().count()
        );
    }

    match console.response() {
        Some(response) => println!("  Response: {} characters generated", response.chars().count()),
        None => println!("  Response: enter a prompt to get started"),
    }
}

fn presets_command() {
    println!("\n=== Quick Examples ===\n");

    for (i, preset) in PRESETS.iter().enumerate() {
        println!("{}. {} ({})", i + 1, preset.title, preset.id);
        println!("   {}", preset.summary);
        println!("   Prompt: {}", preset.prompt);
        println!();
    }

    println!("Load one with :preset <number> in the interactive console.");
}

fn models_command() {
    println!("\n=== Chat Types ===\n");
    for chat_type in ChatType::ALL {
        println!(
            "  {:<12} {} - {}",
            chat_type.as_str(),
            chat_type.label(),
            chat_type.description()
        );
    }

    println!("\n=== Models ===\n");
    for model in ModelId::ALL {
        println!("  {:<14} {}", model.as_str(), model.label());
    }

    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  :type <value>     chat type (chat, completion, analysis, generation)");
    println!("  :model <value>    model (gpt-3.5-turbo, gpt-4, gpt-4-turbo)");
    println!("  :tokens <n>       max response tokens (1-4000)");
    println!("  :temp <x>         sampling temperature (0.0-2.0)");
    println!("  :preset <n|id>    load a quick example into the prompt");
    println!("  :presets          list the quick examples");
    println!("  :send             submit the current prompt");
    println!("  :clear            reset prompt and response");
    println!("  :settings         show current settings");
    println!("  :quit             leave the console");
    println!();
    println!("Any other line becomes the prompt and is submitted immediately.");
}
