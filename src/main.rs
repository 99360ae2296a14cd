//! Carebot CLI
//!
//! Usage:
//!   carebot --text "I have a fever"         # Single evaluation
//!   carebot --interactive                   # Interactive mode
//!   carebot --serve                         # HTTP API server
//!   carebot --text "text" --json            # JSON output

use clap::Parser;
use colored::{ColoredString, Colorize};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use carebot::core::generative::{build_prompt, generate_or_fallback, DEFAULT_GEMINI_MODEL};
use carebot::core::{compose, run_server, Analyzer, GeminiClient, GeminiConfig, KnowledgeBase, ResponseGenerator};
use carebot::types::{Analysis, RiskLevel};
use carebot::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "carebot",
    version = VERSION,
    about = "Carebot - conversational health intake assistant",
    long_about = "Carebot extracts symptoms from a free-text message, scores\n\
                  sentiment and risk, and suggests follow-up questions.\n\n\
                  Modes:\n  \
                  --text         Analyze one message\n  \
                  --interactive  Analyze lines from stdin\n  \
                  --serve        HTTP API server mode\n\n\
                  Risk levels:\n  \
                  LOW        - Nothing concerning detected\n  \
                  MODERATE   - Worth following up\n  \
                  URGENT     - See a professional soon\n  \
                  EMERGENCY  - Seek immediate medical attention\n\n\
                  This tool does not give medical advice."
)]
struct Args {
    /// Message to analyze (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read messages from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, env = "CAREBOT_ADDR", default_value = "127.0.0.1:3001")]
    addr: String,

    /// Knowledge base JSON file (default: built-in knowledge base)
    #[arg(long, env = "CAREBOT_KNOWLEDGE")]
    knowledge: Option<String>,

    /// Gemini API key; without it the fallback reply is used
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    model: String,

    /// Model request timeout in seconds
    #[arg(long, default_value_t = 30)]
    model_timeout: u64,

    /// Also ask the generative model for a reply in text/interactive modes
    #[arg(long)]
    reply: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show entity, sentiment and risk factor breakdown
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("carebot=info")),
        )
        .with_writer(io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let kb = match &args.knowledge {
        Some(path) => KnowledgeBase::from_file(path),
        None => KnowledgeBase::embedded(),
    };
    let kb = match kb {
        Ok(kb) => kb,
        Err(e) => {
            eprintln!("Knowledge base error: {}", e);
            std::process::exit(1);
        }
    };
    let analyzer = Analyzer::new(Arc::new(kb));

    let generator = match GeminiClient::new(GeminiConfig {
        api_key: args.gemini_api_key.clone(),
        model: args.model.clone(),
        timeout_secs: args.model_timeout,
        ..GeminiConfig::default()
    }) {
        Ok(client) => Arc::new(client) as Arc<dyn ResponseGenerator>,
        Err(e) => {
            eprintln!("Model client error: {}", e);
            std::process::exit(1);
        }
    };

    if args.serve {
        run_serve(&args, analyzer, generator).await;
    } else if args.interactive {
        run_interactive(&args, &analyzer, generator.as_ref()).await;
    } else if let Some(ref text) = args.text {
        run_single(text, &args, &analyzer, generator.as_ref()).await;
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args, &analyzer, generator.as_ref()).await;
    }
}

/// Analyze one message
async fn run_single(text: &str, args: &Args, analyzer: &Analyzer, generator: &dyn ResponseGenerator) {
    let analysis = analyzer.analyze(text);
    print_analysis(&analysis, args);
    if args.reply {
        print_reply(text, &analysis, generator).await;
    }
}

/// Analyze lines from stdin
async fn run_interactive(args: &Args, analyzer: &Analyzer, generator: &dyn ResponseGenerator) {
    print_header("Interactive Mode");
    println!("Describe how you feel and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut count = 0usize;

    loop {
        print!("{} ", ">".bold());
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Messages: {}", count);
            break;
        }
        if line.is_empty() {
            continue;
        }

        count += 1;
        let analysis = analyzer.analyze(line);
        print_analysis(&analysis, args);
        if args.reply {
            print_reply(line, &analysis, generator).await;
        }
    }
}

fn print_analysis(analysis: &Analysis, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(analysis) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Could not serialize analysis: {}", e),
        }
    } else if args.verbose {
        print_verbose(analysis);
    } else if args.no_color {
        println!("{}", analysis.to_parseable_string());
    } else {
        println!(
            "{} {} | {}",
            analysis.risk_level.emoji(),
            paint(analysis.risk_level, &format!("risk={}", analysis.risk_level)),
            analysis.to_parseable_string()
        );
        if analysis.risk_level == RiskLevel::Emergency {
            println!("{}", "  ⚠ Seek immediate medical attention".red().bold());
        }
    }
}

/// Compose and print the full user-facing reply
async fn print_reply(text: &str, analysis: &Analysis, generator: &dyn ResponseGenerator) {
    let prompt = build_prompt(text, &analysis.symptoms);
    let model_text = generate_or_fallback(generator, &prompt).await;
    let composed = compose(analysis, &model_text, None);
    println!();
    println!("{}", composed.response);
    println!();
}

fn paint(level: RiskLevel, text: &str) -> ColoredString {
    match level {
        RiskLevel::Low => text.green(),
        RiskLevel::Moderate => text.yellow(),
        RiskLevel::Urgent => text.truecolor(255, 140, 0),
        RiskLevel::Emergency => text.red().bold(),
    }
}

fn print_header(mode: &str) {
    println!("{}", "========================================".bold());
    println!("{}", format!("  Carebot v{} - {}", VERSION, mode).bold());
    println!("{}", "========================================".bold());
    println!();
}

fn print_verbose(analysis: &Analysis) {
    let level = analysis.risk_level;
    println!("{}", paint(level, "┌──────────────────────────────────────"));
    println!(
        "{} {}",
        paint(level, "│"),
        paint(level, &format!("Risk: {} (score {})", level, analysis.risk_score))
    );
    for factor in &analysis.risk_factors {
        println!("{}   - {}", paint(level, "│"), factor);
    }
    println!("{}", paint(level, "├──────────────────────────────────────"));
    println!("{} Symptoms:", paint(level, "│"));
    if analysis.symptoms.is_empty() {
        println!("{}   (none)", paint(level, "│"));
    }
    for s in &analysis.symptoms {
        println!("{}   {:<22} {:>3}%  {}", paint(level, "│"), s.name, s.confidence, s.severity);
    }
    println!("{}", paint(level, "├──────────────────────────────────────"));
    let e = &analysis.entities;
    println!("{} Body parts:  {}", paint(level, "│"), e.body_parts.join(", "));
    println!("{} Intensity:   {}", paint(level, "│"), e.intensity_words.join(", "));
    println!("{} Medications: {}", paint(level, "│"), e.medications.join(", "));
    println!("{} Time:        {}", paint(level, "│"), e.time_expressions.join(", "));
    println!(
        "{} Sentiment:   {:.2} (urgency {})",
        paint(level, "│"),
        analysis.sentiment.score,
        analysis.sentiment.urgency
    );
    if !analysis.suggestions.is_empty() {
        println!("{}", paint(level, "├──────────────────────────────────────"));
        println!("{} Suggestions:", paint(level, "│"));
        for s in &analysis.suggestions {
            println!("{}   - {}", paint(level, "│"), s);
        }
    }
    if !analysis.follow_up_questions.is_empty() {
        println!("{}", paint(level, "├──────────────────────────────────────"));
        println!("{} Follow-up:", paint(level, "│"));
        for (i, q) in analysis.follow_up_questions.iter().enumerate() {
            println!("{}   {}. {}", paint(level, "│"), i + 1, q);
        }
    }
    println!("{}", paint(level, "└──────────────────────────────────────"));
}

/// Run HTTP API server
async fn run_serve(args: &Args, analyzer: Analyzer, generator: Arc<dyn ResponseGenerator>) {
    print_header("API Server");
    if !generator.is_configured() {
        println!("{}", "Gemini API key not configured - replies use the fallback text".yellow());
    }

    if let Err(e) = run_server(&args.addr, analyzer, generator).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
