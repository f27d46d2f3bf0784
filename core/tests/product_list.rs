//! Behaviour of `ProductListClient` against scripted ports.

mod support;

use std::time::{Duration, Instant};

use product_core::{
    ApiError, ClientError, Command, HttpMethod, HttpResponse, NetworkError, Notice, Outcome, PostsClient,
    Product, ProductListClient,
};
use support::{json_response, product, products, RecordingView, ScriptedPrompter, ScriptedTransport};

const BASE_URL: &str = "http://api.test";

type Client = ProductListClient<ScriptedTransport, RecordingView>;

fn client(transport: ScriptedTransport) -> Client {
    ProductListClient::new(PostsClient::new(BASE_URL), transport, RecordingView::default())
}

/// A client that has already loaded products `1..=count`; `transport`
/// scripts whatever comes after the load.
fn loaded(count: u64, mut transport: ScriptedTransport) -> Client {
    transport
        .replies
        .push_front(Ok(json_response(200, &products(1..=count))));
    let mut c = client(transport);
    c.load_all().unwrap();
    c
}

// ---------------------------------------------------------------------------
// Load and pagination
// ---------------------------------------------------------------------------

#[test]
fn load_renders_first_page() {
    let c = loaded(25, ScriptedTransport::default());
    assert_eq!(c.state().items().len(), 25);
    assert_eq!(c.state().current_page(), 1);
    assert_eq!(c.view().ids(), (1..=10).collect::<Vec<_>>());

    let sent = &c.transport().sent;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Get);
    assert_eq!(sent[0].path, "http://api.test/posts");
}

#[test]
fn advancing_twice_shows_all_twenty_five_once() {
    let mut c = loaded(25, ScriptedTransport::default());
    c.advance_page();
    c.advance_page();
    assert_eq!(c.state().current_page(), 3);
    assert_eq!(c.view().ids(), (1..=25).collect::<Vec<_>>());
    // Pagination never touches the network.
    assert_eq!(c.transport().sent.len(), 1);
}

#[test]
fn advancing_past_the_end_appends_nothing() {
    let mut c = loaded(5, ScriptedTransport::default());
    c.advance_page();
    assert_eq!(c.view().ids(), (1..=5).collect::<Vec<_>>());
    assert_eq!(c.state().current_page(), 2);
}

#[test]
fn every_page_matches_the_loaded_slice() {
    let mut c = loaded(37, ScriptedTransport::default());
    for page in 2..=4 {
        c.advance_page();
        let start = (page - 1) * 10;
        let end = (page * 10).min(37);
        assert_eq!(c.state().current_items(), &c.state().items()[start..end], "page {page}");
    }
}

#[test]
fn reload_replaces_items_and_resets_page() {
    let mut c = loaded(
        25,
        ScriptedTransport::default().reply(json_response(200, &products(100..=103))),
    );
    c.advance_page();
    c.load_all().unwrap();
    assert_eq!(c.state().current_page(), 1);
    assert_eq!(c.state().items(), products(100..=103).as_slice());
    assert_eq!(c.view().ids(), vec![100, 101, 102, 103]);
}

#[test]
fn failed_load_keeps_state_and_notifies() {
    let mut c = loaded(15, ScriptedTransport::default().fail("connection refused"));
    c.advance_page();

    let err = c.load_all().unwrap_err();
    assert!(matches!(err, ClientError::Network(NetworkError::Transport(_))));
    assert_eq!(c.state().items().len(), 15);
    assert_eq!(c.state().current_page(), 2);
    assert_eq!(c.view().notices, vec![Notice::LoadFailed]);
}

#[test]
fn rejected_status_is_a_network_error() {
    let mut c = client(ScriptedTransport::default().reply(HttpResponse::new(503, "down")));
    let err = c.load_all().unwrap_err();
    assert!(matches!(
        err,
        ClientError::Network(NetworkError::Api(ApiError::HttpError { status: 503, .. }))
    ));
    assert_eq!(c.view().notices, vec![Notice::LoadFailed]);
    assert!(c.view().shown.is_empty());
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_with_empty_field_sends_nothing() {
    let mut c = loaded(3, ScriptedTransport::default());
    for (title, body) in [("", "B"), ("T", ""), ("", "")] {
        let err = c.create(title, body).unwrap_err();
        assert!(err.is_validation());
    }
    assert_eq!(c.transport().sent.len(), 1);
    assert_eq!(c.view().ids(), vec![1, 2, 3]);
    assert_eq!(c.view().notices, vec![Notice::MissingFields; 3]);
    assert_eq!(c.view().form_clears, 0);
}

#[test]
fn create_prepends_and_clears_form() {
    let created = Product {
        id: 101,
        title: "T".to_string(),
        body: "B".to_string(),
        user_id: 1,
    };
    let mut c = loaded(3, ScriptedTransport::default().reply(json_response(201, &created)));

    assert_eq!(c.create("T", "B").unwrap(), Outcome::Applied);
    assert_eq!(c.view().shown[0], created);
    assert_eq!(c.view().ids(), vec![101, 1, 2, 3]);
    assert_eq!(c.view().form_clears, 1);
    assert_eq!(c.view().notices, vec![Notice::Added]);

    let sent = &c.transport().sent[1];
    assert_eq!(sent.method, HttpMethod::Post);
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"title": "T", "body": "B", "userId": 1}));

    // Created products live only in the view.
    assert_eq!(c.state().items().len(), 3);
}

#[test]
fn created_product_can_show_twice_after_paging() {
    // The server hands back an id that is also on page 2 of the loaded list.
    let created = product(11);
    let mut c = loaded(20, ScriptedTransport::default().reply(json_response(201, &created)));
    c.create("product 11", "body 11").unwrap();
    c.advance_page();

    let ids = c.view().ids();
    assert_eq!(ids.len(), 21);
    assert_eq!(ids.iter().filter(|&&id| id == 11).count(), 2);
}

#[test]
fn failed_create_leaves_view_and_form() {
    let mut c = loaded(2, ScriptedTransport::default().reply(HttpResponse::new(500, "boom")));
    assert!(c.create("T", "B").is_err());
    assert_eq!(c.view().ids(), vec![1, 2]);
    assert_eq!(c.view().form_clears, 0);
    assert_eq!(c.view().notices, vec![Notice::AddFailed]);
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

#[test]
fn edit_with_empty_answer_sends_nothing() {
    let mut c = loaded(3, ScriptedTransport::default());
    let target = product(2);
    for answers in [
        [Some(""), Some("body")],
        [Some("title"), Some("")],
        [None, Some("body")],
        [Some("title"), None],
    ] {
        let mut prompter = ScriptedPrompter::answering(&answers);
        assert_eq!(c.edit(&target, &mut prompter).unwrap(), Outcome::Aborted);
    }
    assert_eq!(c.transport().sent.len(), 1);
    assert_eq!(c.view().shown[1], target);
    assert!(c.view().notices.is_empty());
}

#[test]
fn edit_patches_in_place() {
    let mut updated = product(2);
    updated.title = "Renamed".to_string();
    updated.body = "New body".to_string();
    let mut c = loaded(3, ScriptedTransport::default().reply(json_response(200, &updated)));

    let mut prompter = ScriptedPrompter::answering(&[Some("Renamed"), Some("New body")]);
    assert_eq!(c.edit(&product(2), &mut prompter).unwrap(), Outcome::Applied);

    assert_eq!(c.view().ids(), vec![1, 2, 3]);
    assert_eq!(c.view().shown[1].title, "Renamed");
    assert_eq!(c.state().items()[1].title, "Renamed");
    assert_eq!(c.view().notices, vec![Notice::Updated]);

    let sent = &c.transport().sent[1];
    assert_eq!(sent.method, HttpMethod::Put);
    assert_eq!(sent.path, "http://api.test/posts/2");
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"id": 2, "title": "Renamed", "body": "New body", "userId": 1})
    );
}

#[test]
fn failed_edit_keeps_element() {
    let mut c = loaded(3, ScriptedTransport::default().reply(HttpResponse::new(404, "")));
    let mut prompter = ScriptedPrompter::answering(&[Some("x"), Some("y")]);
    let err = c.edit(&product(3), &mut prompter).unwrap_err();
    assert!(matches!(err, ClientError::Network(NetworkError::Api(ApiError::NotFound))));
    assert_eq!(c.view().shown[2], product(3));
    assert_eq!(c.view().notices, vec![Notice::UpdateFailed]);
}

// ---------------------------------------------------------------------------
// Remove
// ---------------------------------------------------------------------------

#[test]
fn remove_without_confirmation_sends_nothing() {
    let mut c = loaded(3, ScriptedTransport::default());
    let mut prompter = ScriptedPrompter::confirming(false);
    assert_eq!(c.remove(2, &mut prompter).unwrap(), Outcome::Aborted);
    assert_eq!(c.transport().sent.len(), 1);
    assert_eq!(c.view().ids(), vec![1, 2, 3]);
}

#[test]
fn remove_drops_only_that_element() {
    let mut c = loaded(
        3,
        ScriptedTransport::default().reply(HttpResponse::new(200, "{}")),
    );
    let mut prompter = ScriptedPrompter::confirming(true);
    assert_eq!(c.remove(2, &mut prompter).unwrap(), Outcome::Applied);
    assert_eq!(c.view().ids(), vec![1, 3]);
    assert_eq!(c.view().notices, vec![Notice::Deleted]);
    assert_eq!(c.transport().sent[1].method, HttpMethod::Delete);
    assert_eq!(c.transport().sent[1].path, "http://api.test/posts/2");
}

#[test]
fn remove_transport_error_is_terminal() {
    let mut c = loaded(3, ScriptedTransport::default().fail("reset by peer"));
    let mut prompter = ScriptedPrompter::confirming(true);
    assert!(c.remove(1, &mut prompter).is_err());
    assert_eq!(c.transport().sent.len(), 2);
    assert_eq!(c.view().ids(), vec![1, 2, 3]);
    assert_eq!(c.view().notices, vec![Notice::DeleteFailed]);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn search_shows_at_most_ten_results() {
    let mut c = loaded(
        25,
        ScriptedTransport::default().reply(json_response(200, &products(200..=215))),
    );
    c.advance_page();
    assert_eq!(c.search("  lamp ").unwrap(), Outcome::Applied);
    assert_eq!(c.view().ids(), (200..=209).collect::<Vec<_>>());
    assert_eq!(c.transport().sent[1].path, "http://api.test/posts?q=lamp");
    // Loaded items are untouched by a search.
    assert_eq!(c.state().items().len(), 25);
}

#[test]
fn blank_search_restores_first_page() {
    let mut c = loaded(
        25,
        ScriptedTransport::default().reply(json_response(200, &products(200..=202))),
    );
    c.advance_page();
    c.search("lamp").unwrap();

    assert_eq!(c.search("   ").unwrap(), Outcome::Applied);
    assert_eq!(c.view().ids(), (1..=10).collect::<Vec<_>>());
    assert_eq!(c.state().current_page(), 1);
    assert_eq!(c.transport().sent.len(), 2);
}

#[test]
fn failed_search_keeps_view() {
    let mut c = loaded(4, ScriptedTransport::default().reply(HttpResponse::new(200, "<html>")));
    let err = c.search("lamp").unwrap_err();
    assert!(matches!(
        err,
        ClientError::Network(NetworkError::Api(ApiError::DeserializationError(_)))
    ));
    assert_eq!(c.view().ids(), vec![1, 2, 3, 4]);
    assert_eq!(c.view().notices, vec![Notice::SearchFailed]);
}

#[test]
fn stale_search_response_is_dropped() {
    let mut c = loaded(3, ScriptedTransport::default());
    let stale = c.begin_search("la").unwrap();
    let fresh = c.begin_search("lamp").unwrap();
    assert_eq!(stale.query(), "la");

    let outcome = c
        .finish_search(stale, Ok(json_response(200, &products(50..=52))))
        .unwrap();
    assert_eq!(outcome, Outcome::Superseded);
    assert_eq!(c.view().ids(), vec![1, 2, 3]);

    let outcome = c
        .finish_search(fresh, Ok(json_response(200, &products(60..=61))))
        .unwrap();
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(c.view().ids(), vec![60, 61]);
}

#[test]
fn stale_search_failure_is_silent() {
    let mut c = loaded(3, ScriptedTransport::default());
    let stale = c.begin_search("la").unwrap();
    c.on_search_input("lam", Instant::now());
    let outcome = c
        .finish_search(stale, Err(product_core::TransportError("timeout".to_string())))
        .unwrap();
    assert_eq!(outcome, Outcome::Superseded);
    assert!(c.view().notices.is_empty());
}

#[test]
fn load_supersedes_in_flight_search() {
    let mut c = loaded(
        3,
        ScriptedTransport::default().reply(json_response(200, &products(1..=12))),
    );
    let ticket = c.begin_search("lamp").unwrap();
    c.load_all().unwrap();
    let outcome = c
        .finish_search(ticket, Ok(json_response(200, &products(70..=71))))
        .unwrap();
    assert_eq!(outcome, Outcome::Superseded);
    assert_eq!(c.view().ids(), (1..=10).collect::<Vec<_>>());
}

// ---------------------------------------------------------------------------
// Debounce and dispatch
// ---------------------------------------------------------------------------

#[test]
fn debounced_input_sends_only_the_settled_query() {
    let t0 = Instant::now();
    let ms = Duration::from_millis;
    let mut c = loaded(
        3,
        ScriptedTransport::default().reply(json_response(200, &products(80..=81))),
    );
    let mut prompter = ScriptedPrompter::default();

    for (i, text) in ["l", "la", "lam", "lamp"].into_iter().enumerate() {
        let at = t0 + ms(100 * i as u64);
        let outcome = c
            .dispatch(Command::SearchInput(text.to_string()), &mut prompter, at)
            .unwrap();
        assert_eq!(outcome, Outcome::Scheduled);
        assert!(c.poll(at).is_none());
    }

    assert_eq!(c.next_wakeup(), Some(t0 + ms(800)));
    assert!(c.poll(t0 + ms(799)).is_none());
    assert_eq!(c.poll(t0 + ms(800)).unwrap().unwrap(), Outcome::Applied);
    assert!(c.poll(t0 + ms(2000)).is_none());

    let sent = &c.transport().sent;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].path, "http://api.test/posts?q=lamp");
    assert_eq!(c.view().ids(), vec![80, 81]);
}

#[test]
fn custom_debounce_delay_is_respected() {
    let t0 = Instant::now();
    let mut c = client(ScriptedTransport::default()).with_debounce(Duration::from_millis(50));
    c.on_search_input("", t0);
    assert_eq!(c.next_wakeup(), Some(t0 + Duration::from_millis(50)));
    assert_eq!(c.poll(t0 + Duration::from_millis(50)).unwrap().unwrap(), Outcome::Applied);
    assert!(c.transport().sent.is_empty());
}

#[test]
fn dispatch_routes_each_command() {
    let t0 = Instant::now();
    let created = product(500);
    let transport = ScriptedTransport::default()
        .reply(json_response(200, &products(1..=12)))
        .reply(json_response(201, &created))
        .reply(HttpResponse::new(200, "{}"));
    let mut c = client(transport);
    let mut prompter = ScriptedPrompter::confirming(true);

    c.dispatch(Command::Load, &mut prompter, t0).unwrap();
    c.dispatch(Command::LoadMore, &mut prompter, t0).unwrap();
    c.dispatch(
        Command::Create {
            title: "product 500".to_string(),
            body: "body 500".to_string(),
        },
        &mut prompter,
        t0,
    )
    .unwrap();
    c.dispatch(Command::Delete(3), &mut prompter, t0).unwrap();

    let mut expected: Vec<u64> = vec![500];
    expected.extend((1..=12).filter(|&id| id != 3));
    assert_eq!(c.view().ids(), expected);
    assert_eq!(c.view().notices, vec![Notice::Added, Notice::Deleted]);
}

#[test]
fn client_stays_usable_after_failure() {
    let transport = ScriptedTransport::default()
        .fail("dns")
        .reply(json_response(200, &products(1..=2)));
    let mut c = client(transport);
    assert!(c.load_all().is_err());
    assert_eq!(c.load_all().unwrap(), Outcome::Applied);
    assert_eq!(c.view().ids(), vec![1, 2]);
    assert_eq!(c.view().notices, vec![Notice::LoadFailed]);
}
