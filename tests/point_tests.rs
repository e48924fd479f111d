use userpoints::domain::history::TransactionKind;
use userpoints::domain::point::Points;
use userpoints::error::PointError;

mod common;

#[tokio::test]
async fn test_charge_use_scenario() {
    let orchestrator = common::orchestrator();

    let balance = orchestrator.charge(1, 1000).await.unwrap();
    assert_eq!(balance.points, Points::new(1000));
    let history = orchestrator.get_history(1).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, TransactionKind::Charge);
    assert_eq!(history[0].resulting_balance, Points::new(1000));

    assert!(matches!(
        orchestrator.use_points(1, 5000).await,
        Err(PointError::InsufficientBalance { .. })
    ));
    assert_eq!(
        orchestrator.get_balance(1).await.unwrap().points,
        Points::new(1000)
    );

    orchestrator.charge(1, 2000).await.unwrap();
    orchestrator.use_points(1, 1500).await.unwrap();

    let balance = orchestrator.get_balance(1).await.unwrap();
    assert_eq!(balance.points, Points::new(1500));
    let history = orchestrator.get_history(1).await.unwrap();
    assert_eq!(history.len(), 3);
    let last = history.last().unwrap();
    assert_eq!(last.kind, TransactionKind::Use);
    assert_eq!(last.resulting_balance, Points::new(1500));
}

#[tokio::test]
async fn test_validation_errors() {
    let orchestrator = common::orchestrator();

    assert!(matches!(
        orchestrator.charge(5, -100).await,
        Err(PointError::InvalidArgument(_))
    ));
    assert!(matches!(
        orchestrator.use_points(5, 0).await,
        Err(PointError::InvalidArgument(_))
    ));
    assert!(matches!(
        orchestrator.get_balance(0).await,
        Err(PointError::InvalidArgument(_))
    ));
    assert!(matches!(
        orchestrator.get_balance(999).await,
        Err(PointError::UserNotFound(999))
    ));
    assert!(matches!(
        orchestrator.get_history(999).await,
        Err(PointError::UserNotFound(999))
    ));
}

#[tokio::test]
async fn test_history_tracks_balance_after_each_mutation() {
    let orchestrator = common::orchestrator();
    let steps: [(TransactionKind, i64); 6] = [
        (TransactionKind::Charge, 500),
        (TransactionKind::Use, 200),
        (TransactionKind::Charge, 50),
        (TransactionKind::Use, 350),
        (TransactionKind::Charge, 1),
        (TransactionKind::Use, 1),
    ];

    let mut expected = 0u64;
    for (n, (kind, amount)) in steps.into_iter().enumerate() {
        let balance = match kind {
            TransactionKind::Charge => {
                expected += amount as u64;
                orchestrator.charge(3, amount).await.unwrap()
            }
            TransactionKind::Use => {
                expected -= amount as u64;
                orchestrator.use_points(3, amount).await.unwrap()
            }
        };
        assert_eq!(balance.points, Points::new(expected));

        let history = orchestrator.get_history(3).await.unwrap();
        assert_eq!(history.len(), n + 1);
        let last = history.last().unwrap();
        assert_eq!(last.kind, kind);
        assert_eq!(last.resulting_balance, balance.points);
        assert_eq!(orchestrator.get_balance(3).await.unwrap().points, balance.points);
    }
    assert_eq!(expected, 0);
}

#[tokio::test]
async fn test_draining_to_zero_is_allowed() {
    let orchestrator = common::orchestrator();
    orchestrator.charge(4, 300).await.unwrap();

    let balance = orchestrator.use_points(4, 300).await.unwrap();
    assert_eq!(balance.points, Points::ZERO);
    assert!(matches!(
        orchestrator.use_points(4, 1).await,
        Err(PointError::InsufficientBalance {
            requested: 1,
            available: 0
        })
    ));
}

#[tokio::test]
async fn test_sequence_ids_span_users() {
    let orchestrator = common::orchestrator();
    orchestrator.charge(1, 10).await.unwrap();
    orchestrator.charge(2, 10).await.unwrap();
    orchestrator.use_points(1, 5).await.unwrap();

    let first = orchestrator.get_history(1).await.unwrap();
    let second = orchestrator.get_history(2).await.unwrap();
    assert_eq!(first[0].sequence_id, 1);
    assert_eq!(second[0].sequence_id, 2);
    assert_eq!(first[1].sequence_id, 3);
}
