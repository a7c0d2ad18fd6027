use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use tic_tac_toe_client::{
    ClientRequest, ServerMessage,
    view::{BoardView, Cell},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{info, warn};

/// Terminal client for the tic-tac-toe server.
#[derive(Parser)]
struct Args {
    /// WebSocket endpoint of the game server (ws:// or wss://).
    #[arg(long, default_value = "ws://localhost:8080")]
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    println!("🎮 Tic-Tac-Toe Client");
    println!("=====================");
    println!("📡 Connecting to {}...", args.url);

    let (ws_stream, _) = connect_async(args.url.as_str()).await?;
    info!("connected to {}", args.url);

    println!("✅ Connected!");
    println!("   Type a cell number (0-8) to play, 'reset' to restart, Ctrl-D to quit.");

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let mut view = BoardView::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            incoming = ws_receiver.next() => {
                let Some(frame) = incoming else {
                    println!("❌ Server closed connection");
                    break;
                };
                match frame? {
                    Message::Text(text) => match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(message) => {
                            view.apply(message);
                            display(&view);
                        }
                        Err(e) => warn!("dropping unparseable server message: {}", e),
                    },
                    Message::Close(_) => {
                        println!("❌ Server closed connection");
                        break;
                    }
                    _ => {}
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if let Some(request) = parse_command(&line, &view) {
                    let json = serde_json::to_string(&request)?;
                    ws_sender.send(Message::text(json)).await?;
                }
            }
        }
    }

    println!("👋 Session ended.");
    Ok(())
}

fn parse_command(input: &str, view: &BoardView) -> Option<ClientRequest> {
    match input.trim() {
        "" => None,
        "reset" | "r" => Some(view.click_reset()),
        text => match text.parse::<usize>() {
            Ok(position) if position < 9 => {
                let request = view.click_cell(position);
                if request.is_none() {
                    println!("  Cell {} is already taken", position);
                }
                request
            }
            _ => {
                println!("  Invalid input. Enter a cell number 0-8 or 'reset'");
                None
            }
        },
    }
}

fn display(view: &BoardView) {
    println!("\n  Current Board:");
    for row in 0..3 {
        print!("  ");
        for col in 0..3 {
            let index = row * 3 + col;
            match view.board().cell[index] {
                Cell::Empty => print!(" ."),
                Cell::Taken(mark) => print!(" {}", mark),
            }
        }
        println!();
    }
    if !view.player_text().is_empty() {
        println!("  {}", view.player_text());
    }
    if !view.status_text().is_empty() {
        println!("  {}", view.status_text());
    }
    println!();
}
