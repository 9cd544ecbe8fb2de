//! Console boards saving through the REST client

use fleet_console::{
    console::{
        filter::FilterPredicate, AssignmentBoard, AssignmentScheme, AvailabilityBoard, AvailabilityScheme, Board,
        MoveDetails, Side,
    },
    error::ClientError,
    models::enums::Availability,
};

use crate::common::{console_client, console_client_as, reconciler, spawn_server};

async fn availability_board(client: &fleet_console::console::ApiClient) -> AvailabilityBoard {
    let engines = client
        .list_engines(&FilterPredicate::default())
        .await
        .expect("Failed to list engines");
    Board::new(AvailabilityScheme, engines).expect("Duplicate engines")
}

#[tokio::test]
async fn test_board_save_commits_moves() {
    let base_url = spawn_server().await;
    let client = console_client(&base_url).await;
    let mut board = availability_board(&client).await;

    board
        .move_engine("MM1ET00803", Side::Right, &MoveDetails::out_of_service("Repair", None))
        .unwrap();
    board
        .move_engine("MM1ET00805", Side::Left, &MoveDetails::default())
        .unwrap();

    let report = board.save(&reconciler(&client, &base_url)).await.expect("Board is attached");

    assert!(report.is_complete());
    assert_eq!(report.summary(), "2 succeeded, 0 failed");
    assert!(!board.has_changes());

    let remote = client.get_engine("MM1ET00803").await.unwrap();
    assert_eq!(remote.status, Availability::Unavailable);
    assert_eq!(remote.metadata.reason.as_deref(), Some("Repair"));
    assert_eq!(client.get_engine("MM1ET00805").await.unwrap().status, Availability::Available);
}

#[tokio::test]
async fn test_stale_move_is_rolled_back() {
    let base_url = spawn_server().await;
    let client = console_client(&base_url).await;
    let saver = reconciler(&client, &base_url);
    assert_eq!(saver.max_in_flight(), 4);

    let mut first = availability_board(&client).await;
    let mut second = availability_board(&client).await;

    first
        .move_engine("MM1ET00803", Side::Right, &MoveDetails::default())
        .unwrap();
    first.save(&saver).await.unwrap();

    second
        .move_engine("MM1ET00803", Side::Right, &MoveDetails::default())
        .unwrap();
    second
        .move_engine("MM1ET00806", Side::Right, &MoveDetails::default())
        .unwrap();
    let report = second.save(&saver).await.unwrap();

    assert_eq!(report.succeeded, vec!["MM1ET00806"]);
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(report.failed[0].error, ClientError::Conflict(_)));
    assert_eq!(second.side_of("MM1ET00803"), Some(Side::Left));
    assert_eq!(second.side_of("MM1ET00806"), Some(Side::Right));
    assert!(second.changes().get("MM1ET00803").is_some_and(|m| m.is_failed()));
}

#[tokio::test]
async fn test_vanished_engine_reports_conflict() {
    let base_url = spawn_server().await;
    let client = console_client(&base_url).await;
    let mut board = availability_board(&client).await;

    board
        .move_engine("MM1ET00806", Side::Right, &MoveDetails::default())
        .unwrap();
    client.delete_engine("MM1ET00806").await.unwrap();

    let report = board.save(&reconciler(&client, &base_url)).await.unwrap();

    assert!(matches!(report.failed[0].error, ClientError::Conflict(_)));
    assert_eq!(board.side_of("MM1ET00806"), Some(Side::Left));
}

#[tokio::test]
async fn test_assignment_board_round_trip() {
    let base_url = spawn_server().await;
    let client = console_client(&base_url).await;
    let listing = client.affectation(&FilterPredicate::default()).await.unwrap();
    let engines = listing.available.into_iter().chain(listing.affected).collect();
    let mut board: AssignmentBoard = Board::new(AssignmentScheme, engines).unwrap();

    board
        .drop_on("MM1ET00806", "affected", &MoveDetails::assign_to("DEPA"))
        .unwrap();
    let report = board
        .save(&reconciler(&client, &base_url))
        .await
        .unwrap();
    assert!(report.is_complete());

    let stats = client.affectation_stats().await.unwrap();
    assert_eq!(stats.right, 1);
    assert_eq!(stats.by_demandeur[0].demandeur, "DEPA");

    let listing = client
        .affectation(&FilterPredicate::default().with_demandeur("DEPA"))
        .await
        .unwrap();
    assert_eq!(listing.affected.len(), 1);
    assert!(listing.available.is_empty());
}

#[tokio::test]
async fn test_viewer_save_is_forbidden_and_rolled_back() {
    let base_url = spawn_server().await;
    let client = console_client_as(&base_url, "viewer").await;
    let mut board = availability_board(&client).await;

    board
        .move_engine("MM1ET00803", Side::Right, &MoveDetails::default())
        .unwrap();
    let report = board.save(&reconciler(&client, &base_url)).await.unwrap();

    assert!(matches!(report.failed[0].error, ClientError::Forbidden(_)));
    assert_eq!(board.side_of("MM1ET00803"), Some(Side::Left));
}
