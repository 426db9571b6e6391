//! Money Transfer Wizard
//!
//! This example drives a four-screen transfer wizard with a state machine.
//! Every screen "answers itself" from a scripted user, so the whole flow
//! runs from a single submitted event.
//!
//! Key concepts:
//! - Guards that read controller data at submission time
//! - Two routes on the same event, picked by mutually exclusive guards
//! - Handlers dispatched onto a worker pool that submit the next event
//! - Machine configuration loaded from JSON
//!
//! Run with: cargo run --example money_transfer
//! Set RUST_LOG=switchyard=debug to see every transition.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use switchyard::builder::{on, StateMachineBuilder};
use switchyard::dispatch::ThreadPool;
use switchyard::engine::{MachineConfig, StateMachine};
use switchyard::{event_enum, state_enum, Condition};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Screen {
        Start,
        FromSelection,
        ToSelection,
        Amount,
        Confirm,
        Complete,
    }
    final: [Complete]
}

event_enum! {
    enum UserAction {
        FromChosen,
        ToChosen,
        AmountEntered,
        Confirmed,
    }
}

#[derive(Debug, Default)]
struct Transfer {
    from: Option<&'static str>,
    to: Option<&'static str>,
    cents: u64,
}

struct Wizard {
    machine: StateMachine<Screen, UserAction>,
    transfer: Mutex<Transfer>,
}

impl Wizard {
    fn new(config: MachineConfig, pool: Arc<ThreadPool>) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let has_from = guard(this, |t| t.from.is_some());
            let needs_from = guard(this, |t| t.from.is_none());
            let has_to = guard(this, |t| t.to.is_some());
            let needs_to = guard(this, |t| t.to.is_none());

            let machine = StateMachineBuilder::new()
                .initial(Screen::Start)
                .config(config)
                .work_queue(pool)
                .transitions_from(
                    Screen::Start,
                    [
                        on(UserAction::FromChosen)
                            .to(Screen::ToSelection)
                            .run(answer(this, Screen::ToSelection)),
                        on(UserAction::ToChosen)
                            .to(Screen::FromSelection)
                            .run(answer(this, Screen::FromSelection)),
                    ],
                )
                .transitions_from(
                    Screen::ToSelection,
                    [
                        on(UserAction::ToChosen)
                            .to(Screen::Amount)
                            .when(has_from)
                            .run(answer(this, Screen::Amount)),
                        on(UserAction::ToChosen)
                            .to(Screen::FromSelection)
                            .when(needs_from)
                            .run(answer(this, Screen::FromSelection)),
                    ],
                )
                .transitions_from(
                    Screen::FromSelection,
                    [
                        on(UserAction::FromChosen)
                            .to(Screen::Amount)
                            .when(has_to)
                            .run(answer(this, Screen::Amount)),
                        on(UserAction::FromChosen)
                            .to(Screen::ToSelection)
                            .when(needs_to)
                            .run(answer(this, Screen::ToSelection)),
                    ],
                )
                .transition(
                    Screen::Amount,
                    on(UserAction::AmountEntered)
                        .to(Screen::Confirm)
                        .run(answer(this, Screen::Confirm)),
                )
                .transition(
                    Screen::Confirm,
                    on(UserAction::Confirmed)
                        .to(Screen::Complete)
                        .run(answer(this, Screen::Complete)),
                )
                .build()
                .unwrap();

            Self {
                machine,
                transfer: Mutex::new(Transfer::default()),
            }
        })
    }

    /// What the scripted user does on each screen.
    fn respond(&self, screen: Screen) {
        println!("  showing {screen:?}");
        let action = {
            let mut transfer = self.transfer.lock();
            match screen {
                Screen::FromSelection => {
                    transfer.from = Some("checking");
                    UserAction::FromChosen
                }
                Screen::ToSelection => {
                    transfer.to = Some("savings");
                    UserAction::ToChosen
                }
                Screen::Amount => {
                    transfer.cents = 1_250;
                    UserAction::AmountEntered
                }
                Screen::Confirm => {
                    println!(
                        "  confirming {} cents from {:?} to {:?}",
                        transfer.cents, transfer.from, transfer.to
                    );
                    UserAction::Confirmed
                }
                Screen::Start | Screen::Complete => return,
            }
        };
        self.machine.submit_event(action);
    }
}

fn guard(this: &Weak<Wizard>, check: fn(&Transfer) -> bool) -> Condition {
    let this = this.clone();
    Condition::new(move || {
        this.upgrade()
            .map(|wizard| check(&wizard.transfer.lock()))
            .unwrap_or(false)
    })
}

fn answer(this: &Weak<Wizard>, screen: Screen) -> impl Fn() + Send + Sync + 'static {
    let this = this.clone();
    move || {
        if let Some(wizard) = this.upgrade() {
            wizard.respond(screen);
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Money Transfer Wizard Example ===\n");

    let config: MachineConfig =
        serde_json::from_str(r#"{ "handler_dispatch": "concurrent" }"#).unwrap();
    println!("Config: {config:?}\n");

    let pool = Arc::new(ThreadPool::new(config.worker_threads));
    let wizard = Wizard::new(config, Arc::clone(&pool));

    println!("User picks the target account first:");
    wizard.transfer.lock().to = Some("savings");
    wizard.machine.submit_event(UserAction::ToChosen);
    pool.wait_idle();

    println!("\nFinal screen: {:?}", wizard.machine.current_state());
    println!("Is complete: {}", wizard.machine.is_final());

    println!("\n=== Example Complete ===");
}
