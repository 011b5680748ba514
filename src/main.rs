//! terncalc - CLI Entry Point
//!
//! Commands:
//! - `terncalc eval <keys>` - Feed a key sequence and print the display
//! - `terncalc enabled <keys>` - Show which buttons are usable afterwards
//! - `terncalc format <value>` / `parse <text>` - Convert numbers
//! - `terncalc tui` - Interactive keypad
//! - `terncalc test` - Built-in self-test

use clap::{Parser, Subcommand};
use terncalc::{Calculator, EngineConfig, InputAction};

#[derive(Parser)]
#[command(name = "terncalc")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "A calculator that works in base 3")]
struct Cli {
    /// JSON file with engine options
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed keys (0-2 + - * / ( ) = C A U R) and print the display
    Eval {
        /// Key sequence, e.g. "10+2="
        keys: String,
        /// Print the final engine state as JSON
        #[arg(short, long)]
        json: bool,
        /// Print every step
        #[arg(short, long)]
        trace: bool,
    },
    /// Feed keys, then list which buttons are enabled and why not
    Enabled {
        /// Key sequence to feed first
        #[arg(default_value = "")]
        keys: String,
    },
    /// Print the ternary form of a decimal integer
    Format {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Print the decimal value of ternary text
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Interactive keypad
    Tui,
    /// Run the built-in self-test
    Test,
}

fn main() {
    terncalc::init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    match cli.command {
        Some(Commands::Eval { keys, json, trace }) => {
            eval_keys(&config, &keys, json, trace);
        }
        Some(Commands::Enabled { keys }) => {
            show_enabled(&config, &keys);
        }
        Some(Commands::Format { value }) => {
            println!("{}", terncalc::format_ternary(value));
        }
        Some(Commands::Parse { text }) => match terncalc::parse_ternary(&text) {
            Ok(value) => println!("{}", value),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::Tui) => {
            run_tui(&config);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("terncalc v0.1.0");
            println!("A base-3 calculator");
            println!();
            println!("Use --help for available commands");
            println!();
            demo();
        }
    }
}

/// Parse a key string into actions, exiting on unknown keys.
fn parse_keys(keys: &str) -> Vec<InputAction> {
    keys.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match InputAction::from_key(c) {
            Some(action) => action,
            None => {
                eprintln!("❌ Unknown key '{}' (expected 0-2 + - * / ( ) = C A U R)", c);
                std::process::exit(1);
            }
        })
        .collect()
}

fn eval_keys(config: &EngineConfig, keys: &str, json: bool, trace: bool) {
    let mut calc = Calculator::with_config(config);
    let mut rejected = 0;

    for action in parse_keys(keys) {
        match calc.feed(action) {
            Ok(value) => {
                if trace {
                    println!("{:>4}  {:<20} = {}", action, calc.expression(), terncalc::format_ternary(value));
                }
            }
            Err(e) => {
                rejected += 1;
                if trace {
                    println!("{:>4}  ✗ {}", action, e);
                }
            }
        }
    }

    if json {
        match serde_json::to_string_pretty(calc.state()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to serialize state: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{} ({})", calc.display_ternary(), calc.display());
    if rejected > 0 {
        eprintln!("⚠️  {} input(s) rejected. Use --trace to see why.", rejected);
    }
}

fn show_enabled(config: &EngineConfig, keys: &str) {
    let mut calc = Calculator::with_config(config);
    for action in parse_keys(keys) {
        calc.press(action);
    }

    println!("Expression: {}", calc.expression());
    println!("Display:    {} ({})", calc.display_ternary(), calc.display());
    println!();
    for (action, reason) in calc.enabled().iter() {
        match reason {
            None => println!("  {:>4}  ✓", action),
            Some(reason) => println!("  {:>4}  ✗ {}", action, reason),
        }
    }
}

#[cfg(feature = "tui")]
fn run_tui(config: &EngineConfig) {
    if let Err(e) = terncalc::run_keypad(config) {
        eprintln!("❌ Keypad error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_tui(_config: &EngineConfig) {
    eprintln!("❌ Built without the `tui` feature");
    std::process::exit(1);
}

fn demo() {
    println!("━━━ Base-3 Demo ━━━");
    println!();
    for value in [0i64, 1, 2, 3, 8, 9, -5, 42] {
        println!("  {:>4} = {}", value, terncalc::format_ternary(value));
    }
    println!();

    let mut calc = Calculator::new();
    for keys in ["(12+2)*10=", "2-10=", "21/2="] {
        calc.press(InputAction::ClearAll);
        match calc.feed_keys(keys) {
            Ok(value) => println!("  {:<12} {} ({})", keys, calc.display_ternary(), value),
            Err(e) => println!("  {:<12} ✗ {}", keys, e),
        }
    }
}

fn run_self_test() {
    use terncalc::{CalcError, Token};
    use terncalc::calc::EvalError;

    println!("━━━ terncalc Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: digits compose in base 3
    print!("Digits compose in base 3... ");
    let mut calc = Calculator::new();
    if calc.feed_keys("10") == Ok(3) && calc.display_ternary().as_str() == "10" {
        println!("✓"); passed += 1;
    } else {
        println!("✗"); failed += 1;
    }

    // Test 2: division by zero keeps state
    print!("Division by zero keeps state... ");
    let mut calc = Calculator::new();
    let _ = calc.feed_keys("1/0");
    let before = calc.state().clone();
    let result = calc.feed(InputAction::Token(Token::Equals));
    if result == Err(CalcError::Eval(EvalError::DivisionByZero)) && calc.state() == &before {
        println!("✓"); passed += 1;
    } else {
        println!("✗"); failed += 1;
    }

    // Test 3: empty parenthetical cannot close
    print!("Empty parenthetical cannot close... ");
    let mut calc = Calculator::new();
    let _ = calc.feed_keys("(");
    if !calc.enabled().is_enabled(InputAction::Token(Token::Close)) {
        println!("✓"); passed += 1;
    } else {
        println!("✗"); failed += 1;
    }

    // Test 4: undo after equals
    print!("Undo after equals... ");
    let mut calc = Calculator::new();
    let _ = calc.feed_keys("1+1");
    let intermediate = calc.display();
    let evaluated = calc.feed(InputAction::Token(Token::Equals));
    let undone = calc.feed(InputAction::Undo);
    if evaluated == Ok(2) && undone == Ok(intermediate) && calc.can_redo() {
        println!("✓"); passed += 1;
    } else {
        println!("✗"); failed += 1;
    }

    // Test 5: formatter round trip
    print!("Formatter round trip... ");
    let ok = [i64::MIN, -42, 0, 42, i64::MAX]
        .iter()
        .all(|&v| terncalc::parse_ternary(&terncalc::format_ternary(v)) == Ok(v));
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
