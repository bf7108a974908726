use fleet_core::test_fixtures::{base_content, base_state, make_rng};
use fleet_core::{create_initial_state, step_turn, TurnOrders};
use fleet_world::{GameRepository, InMemoryRepository, JsonDirRepository};

fn exercise(repo: &dyn GameRepository) {
    let content = base_content();
    let mut rng = make_rng();
    let first = create_initial_state(65_000, 3, &content, &mut rng).unwrap();
    let second = create_initial_state(40_000, 2, &content, &mut rng).unwrap();

    assert!(repo.load(first.meta.id).unwrap().is_none());
    repo.save(&first).unwrap();
    repo.save(&second).unwrap();
    assert_eq!(repo.load(first.meta.id).unwrap().as_ref(), Some(&first));

    let advanced = step_turn(&first, &TurnOrders::advance_only(), &content, &mut rng);
    repo.save(&advanced).unwrap();
    assert_eq!(repo.load(first.meta.id).unwrap(), Some(advanced));

    let mut expected = vec![first.meta.id, second.meta.id];
    expected.sort_by_key(|id| id.0);
    assert_eq!(repo.list().unwrap(), expected);
}

#[test]
fn in_memory_repository_round_trips_games() {
    exercise(&InMemoryRepository::new());
}

#[test]
fn json_dir_repository_round_trips_games() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonDirRepository::new(dir.path().join("games")).unwrap();
    exercise(&repo);

    // Only the final snapshots remain, one file per game.
    let files = std::fs::read_dir(repo.dir()).unwrap().count();
    assert_eq!(files, 2);
}

#[test]
fn json_dir_repository_ignores_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonDirRepository::new(dir.path()).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("not-a-uuid.json"), "{}").unwrap();

    let content = base_content();
    let state = base_state(&content);
    repo.save(&state).unwrap();

    assert_eq!(repo.list().unwrap(), vec![state.meta.id]);
}

#[test]
fn json_dir_repository_reports_corrupt_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonDirRepository::new(dir.path()).unwrap();
    let content = base_content();
    let state = base_state(&content);
    std::fs::write(dir.path().join(format!("{}.json", state.meta.id)), "{ broken").unwrap();

    let err = repo.load(state.meta.id).unwrap_err();
    assert!(format!("{err:#}").contains("parsing"));
}
