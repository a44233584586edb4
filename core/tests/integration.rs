//! End-to-end flows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `TaskListClient`
//! over real HTTP with `UreqTransport` and an in-memory page, the same way a
//! host would after page load.

use std::net::SocketAddr;

use tasklist_core::{
    Action, ClientConfig, HttpMethod, HttpRequest, HttpResponse, LoadState, ManualClock,
    MemoryPage, MessageKind, TaskForm, TaskListClient, TaskStatus, Transport, UreqTransport,
};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr) -> TaskListClient<UreqTransport, MemoryPage, ManualClock> {
    let config = ClientConfig::default().with_origin(format!("http://{addr}"));
    TaskListClient::with_clock(&config, UreqTransport::new(), MemoryPage::new(), ManualClock::new())
}

fn titles(client: &TaskListClient<UreqTransport, MemoryPage, ManualClock>) -> Vec<String> {
    client
        .page()
        .container
        .as_ref()
        .map(|node| {
            node.find_by_class("task-title")
                .into_iter()
                .map(|el| el.text_content())
                .collect()
        })
        .unwrap_or_default()
}

fn submit(
    client: &mut TaskListClient<UreqTransport, MemoryPage, ManualClock>,
    title: &str,
    status: TaskStatus,
) {
    client.page_mut().form = TaskForm {
        title: title.to_string(),
        description: String::new(),
        status,
    };
    client.dispatch(Action::Submit);
}

#[test]
fn page_lifecycle() {
    let addr = start_server();
    let mut client = client_for(addr);

    // Page load: empty collection.
    assert_eq!(client.start(), &LoadState::Empty);
    assert_eq!(client.page().api_url, format!("http://{addr}/api/v1/tasks"));
    assert_eq!(client.page().task_count, "0");

    // Blank title never reaches the server.
    submit(&mut client, "  ", TaskStatus::Active);
    assert!(client.page().message(MessageKind::Error).is_some());
    assert_eq!(client.state(), &LoadState::Empty);

    // Two creates; the newest renders first.
    submit(&mut client, "First", TaskStatus::Active);
    submit(&mut client, "Second", TaskStatus::Pending);
    assert_eq!(client.state(), &LoadState::Loaded(2));
    assert_eq!(client.page().task_count, "2");
    assert_eq!(titles(&client), vec!["Second", "First"]);
    assert_eq!(client.page().form, TaskForm::default());
    assert_eq!(
        client.page().message(MessageKind::Success),
        Some("Задача \"Second\" создана!")
    );
    assert!(client.page().message(MessageKind::Error).is_none());

    // Complete the newest through the card's own listener.
    let complete = client.page().container.as_ref().unwrap().listeners()[0].clone();
    assert!(matches!(complete, Action::Complete(_)));
    client.dispatch(complete);
    let grid = client.page().container.clone().unwrap();
    let buttons = grid.find_by_class("btn");
    assert!(buttons[0].disabled, "completed card disables its complete button");
    assert!(!buttons[2].disabled, "other card stays enabled");

    // Declined delete changes nothing.
    client.page_mut().confirm_answer = false;
    let delete = grid.listeners()[1].clone();
    client.dispatch(delete.clone());
    assert_eq!(client.state(), &LoadState::Loaded(2));

    // Confirmed delete removes it.
    client.page_mut().confirm_answer = true;
    client.dispatch(delete);
    assert_eq!(client.state(), &LoadState::Loaded(1));
    assert_eq!(titles(&client), vec!["First"]);
    assert_eq!(client.page().prompts.len(), 2);
}

#[test]
fn server_validation_detail_reaches_the_user() {
    let addr = start_server();
    let mut client = client_for(addr);
    client.start();

    let long_title = "x".repeat(mock_server::TITLE_MAX_LEN + 1);
    submit(&mut client, &long_title, TaskStatus::Active);

    let error = client.page().message(MessageKind::Error).unwrap();
    assert_eq!(
        error,
        "Ошибка создания задачи: String should have at most 200 characters"
    );
    assert_eq!(client.state(), &LoadState::Empty);
}

#[test]
fn mutations_on_missing_tasks_report_status() {
    let addr = start_server();
    let mut client = client_for(addr);
    client.start();

    let err = client.update_task_status(404, TaskStatus::Completed).unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(
        client.page().message(MessageKind::Error),
        Some("Ошибка обновления задачи: HTTP error! status: 404")
    );

    client.page_mut().confirm_answer = true;
    assert!(client.delete_task(404).is_err());
    assert_eq!(client.state(), &LoadState::Empty);
}

#[test]
fn unreachable_server_shows_load_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut client = client_for(addr);
    assert!(matches!(client.start(), LoadState::Failed(_)));
    let container = client.page().container.as_ref().unwrap();
    assert_eq!(container.find_by_class("error").len(), 1);
    assert!(container.find_by_class("task-card").is_empty());
}

#[test]
fn transport_returns_error_statuses_as_data() {
    let addr = start_server();
    let response: HttpResponse = UreqTransport::new()
        .execute(HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://{addr}/api/v1/tasks/tasks/1"),
            headers: Vec::new(),
            body: None,
        })
        .unwrap();
    assert_eq!(response.status, 404);
    assert!(response.body.contains("detail"));
}
