use rusqlite::Connection;
use todo_search_core::db::open_db_in_memory;
use todo_search_core::{
    Dataset, InMemoryTodoRepository, Order, SearchStrategy, SeedLoader, Sort,
    SqliteTodoRepository, Todo, TodoField, TodoId, TodoRepository,
};

const TODO_ENTRIES: &str = include_str!("fixtures/todo-entries.json");

const FIRST_TODO_ID: TodoId = 1;
const SECOND_TODO_ID: TodoId = 2;

const SEARCH_TERM_DESCRIPTION_MATCHES: &str = "of one match";
const SEARCH_TERM_TITLE_MATCHES: &str = "title";
const SEARCH_TERM_NO_MATCH: &str = "no match at all";
const SEARCH_TERM_TWO_MATCHES: &str = "tIo";

fn seeded_connection() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    Dataset::from_json_str(TODO_ENTRIES)
        .unwrap()
        .seed(&mut conn)
        .unwrap();
    conn
}

fn ids(todos: &[Todo]) -> Vec<TodoId> {
    todos.iter().map(|todo| todo.id).collect()
}

fn order_by_title_asc() -> Sort {
    Sort::by(Order::asc(TodoField::Title))
}

#[test]
fn find_by_search_term_description_of_one_todo_matches_returns_one_todo() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term(SEARCH_TERM_DESCRIPTION_MATCHES, &order_by_title_asc())
        .unwrap();

    assert_eq!(ids(&todos), vec![FIRST_TODO_ID]);
}

#[test]
fn find_by_search_term_no_match_returns_empty_list() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term(SEARCH_TERM_NO_MATCH, &order_by_title_asc())
        .unwrap();

    assert!(todos.is_empty());
}

#[test]
fn find_by_search_term_title_of_one_todo_matches_returns_one_todo() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term(SEARCH_TERM_TITLE_MATCHES, &order_by_title_asc())
        .unwrap();

    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, FIRST_TODO_ID);
}

#[test]
fn find_by_search_term_two_todos_match_returns_list_sorted_by_title() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term(SEARCH_TERM_TWO_MATCHES, &order_by_title_asc())
        .unwrap();

    assert_eq!(ids(&todos), vec![SECOND_TODO_ID, FIRST_TODO_ID]);
}

#[test]
fn find_by_search_term_sorted_in_query_description_of_one_todo_matches_returns_one_todo() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term_sorted_in_query(SEARCH_TERM_DESCRIPTION_MATCHES)
        .unwrap();

    assert_eq!(ids(&todos), vec![FIRST_TODO_ID]);
}

#[test]
fn find_by_search_term_sorted_in_query_no_match_returns_empty_list() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term_sorted_in_query(SEARCH_TERM_NO_MATCH)
        .unwrap();

    assert!(todos.is_empty());
}

#[test]
fn find_by_search_term_sorted_in_query_title_of_one_todo_matches_returns_one_todo() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term_sorted_in_query(SEARCH_TERM_TITLE_MATCHES)
        .unwrap();

    assert_eq!(ids(&todos), vec![FIRST_TODO_ID]);
}

#[test]
fn find_by_search_term_sorted_in_query_two_todos_match_returns_list_sorted_by_title() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term_sorted_in_query(SEARCH_TERM_TWO_MATCHES)
        .unwrap();

    assert_eq!(ids(&todos), vec![SECOND_TODO_ID, FIRST_TODO_ID]);
}

#[test]
fn find_by_search_term_native_description_of_one_todo_matches_returns_one_todo() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term_native(SEARCH_TERM_DESCRIPTION_MATCHES)
        .unwrap();

    assert_eq!(ids(&todos), vec![FIRST_TODO_ID]);
}

#[test]
fn find_by_search_term_native_no_match_returns_empty_list() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo.find_by_search_term_native(SEARCH_TERM_NO_MATCH).unwrap();

    assert!(todos.is_empty());
}

#[test]
fn find_by_search_term_native_title_of_one_todo_matches_returns_one_todo() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term_native(SEARCH_TERM_TITLE_MATCHES)
        .unwrap();

    assert_eq!(ids(&todos), vec![FIRST_TODO_ID]);
}

#[test]
fn find_by_search_term_native_two_todos_match_returns_list_sorted_by_title() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let todos = repo
        .find_by_search_term_native(SEARCH_TERM_TWO_MATCHES)
        .unwrap();

    assert_eq!(ids(&todos), vec![SECOND_TODO_ID, FIRST_TODO_ID]);
}

#[test]
fn matching_ignores_case_of_term_and_columns() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    for strategy in SearchStrategy::ALL {
        for term in ["WRITE THE", "write the", "wRiTe ThE"] {
            let todos = repo.search(strategy, term, &order_by_title_asc()).unwrap();
            assert_eq!(ids(&todos), vec![FIRST_TODO_ID], "{strategy} `{term}`");
        }
    }
}

#[test]
fn repeated_search_returns_identical_sequence() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    for strategy in SearchStrategy::ALL {
        let first = repo
            .search(strategy, SEARCH_TERM_TWO_MATCHES, &order_by_title_asc())
            .unwrap();
        let second = repo
            .search(strategy, SEARCH_TERM_TWO_MATCHES, &order_by_title_asc())
            .unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn derived_search_honors_descending_and_unsorted_order() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    let descending = repo
        .find_by_search_term(
            SEARCH_TERM_TWO_MATCHES,
            &Sort::by(Order::desc(TodoField::Title)),
        )
        .unwrap();
    assert_eq!(ids(&descending), vec![FIRST_TODO_ID, SECOND_TODO_ID]);

    let unsorted = repo
        .find_by_search_term(SEARCH_TERM_TWO_MATCHES, &Sort::unsorted())
        .unwrap();
    assert_eq!(ids(&unsorted), vec![FIRST_TODO_ID, SECOND_TODO_ID]);
}

#[test]
fn fixed_sort_strategies_ignore_caller_sort() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);
    let descending = Sort::by(Order::desc(TodoField::Title));

    for strategy in [SearchStrategy::SortedInQuery, SearchStrategy::Native] {
        let todos = repo
            .search(strategy, SEARCH_TERM_TWO_MATCHES, &descending)
            .unwrap();
        assert_eq!(ids(&todos), vec![SECOND_TODO_ID, FIRST_TODO_ID]);
    }
}

#[test]
fn like_wildcards_in_term_are_literal() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    for strategy in SearchStrategy::ALL {
        for term in ["%", "_", "W_ite", "\\"] {
            let todos = repo.search(strategy, term, &order_by_title_asc()).unwrap();
            assert!(todos.is_empty(), "{strategy} `{term}` should not match");
        }
    }
}

#[test]
fn like_metacharacters_in_term_match_themselves() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);
    conn.execute_batch(
        r"INSERT INTO todos (id, title, description) VALUES
            (10, '50% off sale', NULL),
            (11, '500 offers', NULL),
            (12, 'f_s notes', NULL),
            (13, 'fxs notes', NULL),
            (14, 'Backup C:\temp', NULL);",
    )
    .unwrap();

    for strategy in SearchStrategy::ALL {
        for (term, expected) in [("50%", 10), ("F_S", 12), ("\\", 14)] {
            let todos = repo.search(strategy, term, &order_by_title_asc()).unwrap();
            assert_eq!(ids(&todos), vec![expected], "{strategy} `{term}`");
        }
    }
}

#[test]
fn terms_longer_than_like_pattern_limit_still_search() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);
    let long_term = "a".repeat(60_000);
    let long_wildcards = "%".repeat(30_000);

    for strategy in SearchStrategy::ALL {
        for term in [&long_term, &long_wildcards] {
            let todos = repo.search(strategy, term, &order_by_title_asc()).unwrap();
            assert!(todos.is_empty(), "{strategy} {} chars", term.len());
        }
    }
}

#[test]
fn nul_in_term_is_matched_literally() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    for strategy in SearchStrategy::ALL {
        for term in ["title\0zzz", "\0", "tIo\0"] {
            let todos = repo.search(strategy, term, &order_by_title_asc()).unwrap();
            assert!(todos.is_empty(), "{strategy} {term:?} should not match");
        }
    }
}

#[test]
fn empty_term_matches_every_todo() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);

    for strategy in SearchStrategy::ALL {
        let todos = repo.search(strategy, "", &order_by_title_asc()).unwrap();
        assert_eq!(ids(&todos), vec![2, 3, 1], "{strategy}");
    }
}

#[test]
fn null_description_never_matches_but_title_still_does() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);
    conn.execute(
        "INSERT INTO todos (id, title, description) VALUES (4, 'Fix the bike', NULL);",
        [],
    )
    .unwrap();

    for strategy in SearchStrategy::ALL {
        let todos = repo.search(strategy, "bike", &order_by_title_asc()).unwrap();
        assert_eq!(ids(&todos), vec![4], "{strategy}");
        assert_eq!(todos[0].description, None);
    }
}

#[test]
fn sqlite_and_in_memory_repositories_agree() {
    let conn = seeded_connection();
    let sqlite = SqliteTodoRepository::new(&conn);
    let memory = InMemoryTodoRepository::from_todos(
        Dataset::from_json_str(TODO_ENTRIES).unwrap().to_todos(),
    );
    let sorts = [
        Sort::unsorted(),
        order_by_title_asc(),
        Sort::by(Order::desc(TodoField::Title)),
        Sort::by(Order::desc(TodoField::ModifiedAt)).then(Order::asc(TodoField::Title)),
    ];

    for strategy in SearchStrategy::ALL {
        for term in [
            "",
            "tIo",
            "TITLE",
            "of one match",
            "milk",
            "%",
            "nothing",
            "title\0zzz",
            "\0",
        ] {
            for sort in &sorts {
                assert_eq!(
                    sqlite.search(strategy, term, sort).unwrap(),
                    memory.search(strategy, term, sort).unwrap(),
                    "{strategy} `{term}` {sort:?}"
                );
            }
        }
    }
}

#[test]
fn search_does_not_modify_rows() {
    let conn = seeded_connection();
    let repo = SqliteTodoRepository::new(&conn);
    let before = repo.list_todos(&Sort::unsorted()).unwrap();

    for strategy in SearchStrategy::ALL {
        repo.search(strategy, SEARCH_TERM_TWO_MATCHES, &order_by_title_asc())
            .unwrap();
    }

    assert_eq!(repo.list_todos(&Sort::unsorted()).unwrap(), before);
}
