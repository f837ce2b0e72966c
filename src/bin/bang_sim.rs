use clap::Parser;
use tracing::{info, warn};

use bang_engine::core::{EngineConfig, GameRng, RoomId};
use bang_engine::rules::RulesEngine;
use bang_engine::service::GameService;
use bang_engine::store::{MemoryStore, RoomStore, SnapshotStore};
use bang_engine::telemetry;

const ROOM: RoomId = RoomId(1);

#[derive(Parser)]
#[command(
    name = "bang-sim",
    version = env!("CARGO_PKG_VERSION"),
    about = "Play a seeded random game and print the final table",
    long_about = None,
)]
struct Args {
    /// Number of players (4 to 7)
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Base seed for the service and the random policy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop after this many accepted actions
    #[arg(long, default_value_t = 200)]
    max_actions: usize,

    /// Keep the room in the encoded snapshot store instead of memory
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing("bang_engine=info,bang_sim=info");
    let args = Args::parse();
    let config = EngineConfig::default().with_seed(args.seed);

    let view = if args.snapshot {
        simulate(GameService::new(SnapshotStore::new(), config), &args)?
    } else {
        simulate(GameService::new(MemoryStore::new(), config), &args)?
    };
    println!("{view}");
    Ok(())
}

fn simulate<S: RoomStore>(
    service: GameService<S>,
    args: &Args,
) -> Result<String, Box<dyn std::error::Error>> {
    service.create_room(ROOM)?;
    for seat in 0..args.players {
        let id = service.add_player(ROOM, &format!("Player{}", seat + 1))?;
        service.set_ready(ROOM, id)?;
    }
    for assignment in service.start_game(ROOM)? {
        info!(player = %assignment.id, role = %assignment.role, "role dealt");
    }

    let mut policy = GameRng::new(args.seed).for_context("policy");
    let mut accepted = 0;
    while accepted < args.max_actions {
        let state = service.store().load(ROOM)?;
        let Some(current) = state.current_player else {
            break;
        };
        let candidates = RulesEngine::candidate_actions(&state, current);
        let Some(action) = policy.choose(&candidates).cloned() else {
            break;
        };
        match service.apply(ROOM, current, &action) {
            Ok(outcome) => {
                accepted += 1;
                info!(player = %current, status = %outcome.status(), "action");
            }
            Err(err) => {
                warn!(player = %current, %err, "simulation stopped");
                break;
            }
        }
        if service.store().load(ROOM)?.living_ids().len() <= 1 {
            break;
        }
    }

    info!(actions = accepted, "simulation finished");
    Ok(serde_json::to_string_pretty(&service.room_view(ROOM)?)?)
}
