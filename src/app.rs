use anyhow::Result;
use tracing::{error, info, warn};
use tui::{backend::Backend, Terminal};

use crate::api::{ApiError, GraphqlClient};
use crate::models::NewProject;
use crate::ui::home::{handle_input, render_home, HomeAction, HomeState};

/// Ties the list screen to the GraphQL client.
pub struct App {
    client: GraphqlClient,
    home: HomeState,
}

impl App {
    pub fn new(client: GraphqlClient) -> Self {
        Self {
            client,
            home: HomeState::Loading,
        }
    }

    pub fn home(&self) -> &HomeState {
        &self.home
    }

    pub fn home_mut(&mut self) -> &mut HomeState {
        &mut self.home
    }

    /// Issue the list query and fold the result into the screen.
    pub async fn fetch_projects(&mut self) {
        info!(endpoint = self.client.endpoint(), "querying projects");
        let result = self.client.get_projects().await;
        if let Err(err) = &result {
            warn!(error = %err, "project query failed");
            log_status_body(err);
        }
        self.home.apply_query_result(result);
    }

    /// Issue the create mutation; refetch the list once it succeeds.
    ///
    /// A failed mutation is only logged.
    pub async fn create_project(&mut self, input: NewProject) {
        info!(name = %input.name, "creating project");
        match self.client.create_project(&input).await {
            Ok(_) => self.fetch_projects().await,
            Err(err) => {
                error!(error = %err, name = %input.name, "create project failed");
                log_status_body(&err);
            }
        }
    }

    /// Apply one screen action. Returns true when the app should exit.
    pub async fn dispatch(&mut self, action: HomeAction) -> bool {
        match action {
            HomeAction::Quit => return true,
            HomeAction::Reload => self.home = HomeState::Loading,
            HomeAction::Create(input) => self.create_project(input).await,
        }
        false
    }
}

fn log_status_body(err: &ApiError) {
    if let ApiError::Status { status, body } = err {
        warn!(status, body = %body, "error response body");
    }
}

pub async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    run_app_with(terminal, app, handle_input).await
}

/// The event loop with the key source supplied by the caller.
pub async fn run_app_with<B, F>(terminal: &mut Terminal<B>, app: &mut App, mut next_action: F) -> Result<()>
where
    B: Backend,
    F: FnMut(&mut HomeState) -> Result<Option<HomeAction>>,
{
    loop {
        terminal.draw(|f| render_home(f, &mut app.home))?;

        // Loading is drawn first, then the query runs.
        if app.home.is_loading() {
            app.fetch_projects().await;
            continue;
        }

        if let Some(action) = next_action(&mut app.home)? {
            if app.dispatch(action).await {
                break;
            }
        }
    }

    Ok(())
}
