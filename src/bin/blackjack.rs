//! Interactive terminal blackjack.

use core::time::Duration;
use std::io::{self, Write};
use std::process::ExitCode;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;
use twentyone::{
    Card, DEALER_STANDS_ON, Deck, Decision, Hand, Outcome, PlayerPolicy, Round, RoundResult,
    Settlement, Suit, evaluate,
};

const WIDTH: usize = 50;

#[derive(Parser)]
#[command(name = "blackjack", about = "Play single-deck blackjack against the dealer")]
struct Args {
    /// Seed for the deck; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between dealer draws and result screens, in milliseconds
    #[arg(long, default_value_t = 1500)]
    delay_ms: u64,

    /// Do not clear the screen between updates
    #[arg(long)]
    no_clear: bool,
}

/// Asks the human at the terminal for each decision.
struct TerminalPlayer<'a> {
    args: &'a Args,
    quit: bool,
}

impl PlayerPolicy for TerminalPlayer<'_> {
    fn decide(&mut self, hand: &Hand, dealer_up: Card) -> Decision {
        loop {
            print_table(self.args, hand, &[dealer_up], false);
            println!("\nChoose an action:");
            println!("  [H] Hit - Draw another card");
            println!("  [S] Stand - Keep your current hand");
            println!("  [Q] Quit after this round");

            let Some(input) = prompt_line("\nYour choice: ") else {
                self.quit = true;
                return Decision::Stand;
            };
            if input == "q" || input == "quit" {
                self.quit = true;
                return Decision::Stand;
            }
            match input.parse::<Decision>() {
                Ok(decision) => return decision,
                Err(err) => {
                    println!("\n{} Invalid choice: {err}.", colorize("x", "31"));
                    pause(self.args);
                }
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    });
    tracing::info!(seed, "starting terminal game");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    loop {
        print_welcome(&args);
        if prompt_line("\nPress ENTER to start the game...").is_none() {
            break;
        }

        let mut player = TerminalPlayer {
            args: &args,
            quit: false,
        };
        let mut round = Round::new(Deck::new());
        match round.play_out(&mut player, &mut rng) {
            Ok(result) => show_result(&args, &round, &result),
            Err(err) => {
                eprintln!("Round error: {err}");
                return ExitCode::FAILURE;
            }
        }

        if player.quit || !ask_play_again() {
            break;
        }
    }

    clear_screen(&args);
    println!("\n{}", "=".repeat(WIDTH));
    println!("{:^WIDTH$}", "Thanks for playing Blackjack!");
    println!("{}\n", "=".repeat(WIDTH));
    ExitCode::SUCCESS
}

fn ask_play_again() -> bool {
    loop {
        match prompt_line("\nPlay again? (Y/N): ").as_deref() {
            Some("y" | "yes") => return true,
            Some("n" | "no") | None => return false,
            Some(_) => println!("Please enter Y or N."),
        }
    }
}

fn show_result(args: &Args, round: &Round, result: &RoundResult) {
    let dealer = round.dealer_hand();
    let player = round.player_hand();

    if result.settlement != Settlement::Natural && result.settlement != Settlement::PlayerBust {
        // Replay the dealer's draws one by one.
        for shown in 2..=dealer.len() {
            print_table(args, player, &dealer.cards()[..shown], true);
            if shown > 2 {
                let drawn = dealer.cards()[shown - 1];
                println!("\nDealer draws {}", format_card(&drawn));
                println!("Dealer's score: {}", evaluate(&dealer.cards()[..shown]));
            } else {
                println!("\nDealer's turn... (draws to {DEALER_STANDS_ON})");
            }
            pause(args);
        }
    }

    print_table(args, player, dealer.cards(), true);
    println!("\n{}", "=".repeat(WIDTH));
    println!("{:^WIDTH$}", "FINAL RESULTS");
    println!("{}", "=".repeat(WIDTH));
    println!("  Your score:   {}", result.player_value);
    println!("  Dealer score: {}", result.dealer_value);
    println!("{}", "-".repeat(WIDTH));

    let color = match result.outcome {
        Outcome::PlayerWin => "32",
        Outcome::DealerWin => "31",
        Outcome::Tie => "33",
    };
    println!("\n{}", colorize(result.message(), color));
    println!("{}", "=".repeat(WIDTH));
}

fn print_welcome(args: &Args) {
    clear_screen(args);
    println!("{}", "=".repeat(WIDTH));
    println!("{:^WIDTH$}", "BLACKJACK");
    println!("{}", "=".repeat(WIDTH));
    println!("\nWelcome to Blackjack!");
    println!("\nRules:");
    println!("  - Get as close to 21 as possible without going over");
    println!("  - Face cards (J, Q, K) are worth 10 points");
    println!("  - Aces can be worth 1 or 11 points");
    println!("  - Dealer must draw until reaching at least {DEALER_STANDS_ON}");
    println!("\n{}", "=".repeat(WIDTH));
}

/// Prints both hands. Before the reveal `dealer` holds only the up card.
fn print_table(args: &Args, player: &Hand, dealer: &[Card], revealed: bool) {
    clear_screen(args);
    println!("{}", "=".repeat(WIDTH));
    println!("{:^WIDTH$}", "BLACKJACK");
    println!("{}", "=".repeat(WIDTH));

    println!("\nDealer's Hand:");
    if revealed {
        println!("  {}", format_cards(dealer));
        println!("  Score: {}", evaluate(dealer));
    } else {
        println!("  {}  [Hidden]", format_cards(dealer));
        println!("  Score: ?");
    }

    println!("\nPlayer's Hand:");
    println!("  {}", format_cards(player.cards()));
    println!("  Score: {}", player.value());
    println!("\n{}", "-".repeat(WIDTH));
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_lowercase()),
    }
}

fn pause(args: &Args) {
    if args.delay_ms > 0 {
        thread::sleep(Duration::from_millis(args.delay_ms));
    }
}

fn clear_screen(args: &Args) {
    if !args.no_clear {
        print!("\u{1b}[2J\u{1b}[H");
        let _ = io::stdout().flush();
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs | Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
