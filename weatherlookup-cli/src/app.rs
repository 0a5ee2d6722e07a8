use std::{fmt, time::Duration};

use inquire::{InquireError, Select, Text};
use tokio::{sync::mpsc, time};
use tracing::{debug, info};
use weatherlookup_core::{
    Completion, DisplayZone, FetchTicket, Field, Input, ViewController, render_card,
};

/// How long the loop waits for an outstanding fetch before showing the
/// last-known card and prompting again.
const SETTLE_WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Refresh,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search another location",
            Action::Refresh => "Refresh",
            Action::Quit => "Quit",
        })
    }
}

/// Interactive front end. Owns the controller; fetches run as tasks and report
/// back over a channel so the loop stays the only writer of the view state.
pub struct App {
    controller: ViewController,
    zone: DisplayZone,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl App {
    pub fn new(controller: ViewController, zone: DisplayZone) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { controller, zone, tx, rx }
    }

    fn dispatch(&mut self, ticket: FetchTicket) {
        let provider = self.controller.provider();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let completion = ticket.run(provider.as_ref()).await;
            // Receiver only goes away when the app exits.
            let _ = tx.send(completion);
        });
    }

    fn apply(&mut self, completion: Completion) {
        let outcome = self.controller.complete(completion);
        debug!(?outcome, in_flight = self.controller.in_flight(), "completion applied");
    }

    /// Wait up to `wait` for the newest fetch to settle, then apply whatever
    /// else has already arrived. Requests that outlive the wait keep running
    /// and are applied on a later pass.
    async fn settle(&mut self, wait: Duration) {
        let deadline = time::Instant::now() + wait;

        while self.controller.in_flight() > 0 {
            match time::timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(completion)) => self.apply(completion),
                Ok(None) => break,
                Err(_) => {
                    info!(in_flight = self.controller.in_flight(), "fetch still pending");
                    break;
                }
            }
        }

        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
        }
    }

    fn send(&mut self, input: Input) {
        if let Some(ticket) = self.controller.handle(input) {
            self.dispatch(ticket);
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        if let Some(ticket) = self.controller.mount() {
            self.dispatch(ticket);
        }

        loop {
            self.settle(SETTLE_WAIT).await;
            println!("\n{}", render_card(self.controller.state(), &self.zone.now_as_of()));
            if self.controller.in_flight() > 0 {
                println!("(update still in progress)");
            }
            println!();

            let action = match Select::new(
                "What next?",
                vec![Action::Search, Action::Refresh, Action::Quit],
            )
            .prompt()
            {
                Ok(action) => action,
                Err(err) if is_cancel(&err) => return Ok(()),
                Err(err) => return Err(err.into()),
            };

            match action {
                Action::Search => {
                    if !self.search()? {
                        return Ok(());
                    }
                }
                Action::Refresh => self.send(Input::Submit),
                Action::Quit => return Ok(()),
            }
        }
    }

    /// Edit both fields; Enter in the country field submits.
    /// Returns `false` when the user cancelled.
    fn search(&mut self) -> anyhow::Result<bool> {
        for field in [Field::City, Field::Country] {
            let (label, current) = match field {
                Field::City => ("City:", self.controller.state().city.clone()),
                Field::Country => ("Country:", self.controller.state().country.clone()),
            };

            match Text::new(label).with_initial_value(&current).prompt() {
                Ok(text) => self.send(Input::Edit(field, text)),
                Err(err) if is_cancel(&err) => return Ok(false),
                Err(err) => return Err(err.into()),
            }
        }

        self.send(Input::Enter(Field::Country));
        Ok(true)
    }
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}
