use holdem_odds::cli;

fn main() {
    cli::run();
}
