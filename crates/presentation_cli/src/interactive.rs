//! Interactive prompt
//!
//! Each line read from stdin is either a command (`:theme`, `:retry`,
//! `:clear`, `:quit`) or text typed into the search field and submitted.
//! Searches run as background tasks; starting a new one aborts the task of
//! the search it supersedes.

use std::sync::Arc;

use application::{Submission, ViewContent, WidgetService};
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::render::{RenderMode, render};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    ToggleTheme,
    Retry,
    Clear,
    Help,
    /// Text for the search field, submitted immediately
    Search(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":quit" | ":q" | ":exit" => Self::Quit,
            ":theme" | ":t" => Self::ToggleTheme,
            ":retry" | ":r" => Self::Retry,
            ":clear" | ":c" => Self::Clear,
            ":help" | ":h" | "?" => Self::Help,
            _ => Self::Search(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

const HELP: &str = "Type a city and press Enter to search.\n\
                    :theme  toggle light/dark\n\
                    :retry  retry a failed search\n\
                    :clear  clear the search field\n\
                    :quit   exit";

#[derive(Debug, Clone, Copy)]
enum Action {
    Mount,
    Submit,
    Retry,
}

/// Spawns searches and keeps the handle of the latest one
struct Searches {
    service: Arc<WidgetService>,
    done: mpsc::UnboundedSender<Submission>,
    in_flight: Option<JoinHandle<()>>,
}

impl Searches {
    fn new(service: Arc<WidgetService>, done: mpsc::UnboundedSender<Submission>) -> Self {
        Self {
            service,
            done,
            in_flight: None,
        }
    }

    fn start(&mut self, action: Action) {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!("Aborting superseded search");
            }
            previous.abort();
        }

        let service = Arc::clone(&self.service);
        let done = self.done.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let submission = match action {
                Action::Mount => service.mount().await,
                Action::Submit => service.submit().await,
                Action::Retry => service.retry().await,
            };
            let _ = done.send(submission);
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

fn draw(service: &WidgetService) {
    println!(
        "{}",
        render(&service.view(Utc::now()), RenderMode::Interactive)
    );
    println!("(:help for commands)");
}

/// Run the prompt until `:quit` or end of input
pub async fn run(service: Arc<WidgetService>) -> anyhow::Result<()> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let mut searches = Searches::new(Arc::clone(&service), done_tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    searches.start(Action::Mount);
    draw(&service);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match Input::parse(&line) {
                    Input::Quit => break,
                    Input::Help => println!("{HELP}"),
                    Input::ToggleTheme => {
                        service.toggle_theme();
                        draw(&service);
                    },
                    Input::Clear => {
                        service.clear_query();
                        draw(&service);
                    },
                    Input::Retry => {
                        if matches!(
                            service.state().content,
                            ViewContent::Failed { retryable: true, .. }
                        ) {
                            searches.start(Action::Retry);
                        } else {
                            println!("Nothing to retry");
                        }
                    },
                    Input::Search(text) => {
                        let blank = text.trim().is_empty();
                        service.set_query(text);
                        if blank {
                            draw(&service);
                        } else {
                            searches.start(Action::Submit);
                        }
                    },
                }
            },
            Some(submission) = done_rx.recv() => {
                debug!(?submission, "Search finished");
                if !matches!(submission, Submission::Superseded { .. }) {
                    draw(&service);
                }
            },
        }
    }

    searches.stop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use application::{ApplicationError, WeatherPort};
    use async_trait::async_trait;
    use domain::{CityName, Condition, Humidity, TimezoneOffset, WeatherSnapshot};
    use tokio::sync::oneshot;

    use super::*;

    type Reply = Result<WeatherSnapshot, ApplicationError>;

    /// Port that holds each city's response until the test releases it
    struct GatedPort {
        gates: parking_lot::Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    }

    #[async_trait]
    impl WeatherPort for GatedPort {
        async fn fetch_weather(&self, city: &CityName) -> Reply {
            let gate = self.gates.lock().remove(city.as_str());
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApplicationError::Internal("gate dropped".into()))),
                None => Err(ApplicationError::Internal(format!("no gate for {city}"))),
            }
        }
    }

    fn snapshot(city: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            city_name: city.to_string(),
            condition: Condition::Snow,
            temperature: 2.0,
            humidity: Humidity::clamped(80),
            wind_speed: 1.5,
            timezone_offset: TimezoneOffset::from_seconds(3600),
        }
    }

    async fn settle_until(mut done: impl FnMut() -> bool) {
        for _ in 0..100 {
            if done() {
                return;
            }
            tokio::task::yield_now().await;
        }
        assert!(done(), "condition not reached");
    }

    #[tokio::test]
    async fn new_search_aborts_the_superseded_task() {
        let (paris_tx, paris_rx) = oneshot::channel();
        let (rome_tx, rome_rx) = oneshot::channel();
        let port = GatedPort {
            gates: parking_lot::Mutex::new(HashMap::from([
                ("Paris".to_string(), paris_rx),
                ("Rome".to_string(), rome_rx),
            ])),
        };
        let service = Arc::new(WidgetService::new(
            Arc::new(port),
            CityName::new("Bengaluru").unwrap(),
        ));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let mut searches = Searches::new(Arc::clone(&service), done_tx);

        service.set_query("Paris");
        searches.start(Action::Submit);
        settle_until(|| service.state().search.is_loading).await;
        let first = searches.in_flight.as_ref().unwrap().abort_handle();

        service.set_query("Rome");
        searches.start(Action::Submit);

        // Dropping the aborted task drops its end of the Paris gate
        settle_until(|| paris_tx.is_closed()).await;
        assert!(first.is_finished());

        rome_tx.send(Ok(snapshot("Rome"))).unwrap();
        assert_eq!(
            done_rx.recv().await,
            Some(Submission::Applied { token: 2 })
        );
        settle_until(|| searches.in_flight.as_ref().unwrap().is_finished()).await;
        assert!(done_rx.try_recv().is_err());

        let state = service.state();
        assert!(!state.search.is_loading);
        assert_eq!(
            state.content.snapshot().map(|s| s.city_name.as_str()),
            Some("Rome")
        );
    }

    #[tokio::test]
    async fn stop_aborts_the_running_search() {
        let (paris_tx, paris_rx) = oneshot::channel::<Reply>();
        let port = GatedPort {
            gates: parking_lot::Mutex::new(HashMap::from([("Paris".to_string(), paris_rx)])),
        };
        let service = Arc::new(WidgetService::new(
            Arc::new(port),
            CityName::new("Bengaluru").unwrap(),
        ));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let mut searches = Searches::new(Arc::clone(&service), done_tx);

        service.set_query("Paris");
        searches.start(Action::Submit);
        settle_until(|| service.state().search.is_loading).await;

        searches.stop();
        assert!(searches.in_flight.is_none());
        settle_until(|| paris_tx.is_closed()).await;
        assert!(done_rx.try_recv().is_err());
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Input::parse(":quit"), Input::Quit);
        assert_eq!(Input::parse("  :theme "), Input::ToggleTheme);
        assert_eq!(Input::parse(":retry"), Input::Retry);
        assert_eq!(Input::parse(":clear"), Input::Clear);
        assert_eq!(Input::parse("?"), Input::Help);
    }

    #[test]
    fn other_text_is_a_search() {
        assert_eq!(
            Input::parse("New York\r\n"),
            Input::Search("New York".to_string())
        );
        assert_eq!(Input::parse(":unknown"), Input::Search(":unknown".to_string()));
    }

    #[test]
    fn blank_line_is_an_empty_search() {
        assert_eq!(Input::parse("   "), Input::Search("   ".to_string()));
    }
}
