use quotesify_core::{
    CommandError, CommandResult, EntityList, LineOutcome, ListKind, MemoryStorage, Report,
    Session,
};

fn session() -> Session<MemoryStorage> {
    let mut session = Session::new(MemoryStorage::new());
    session.load().unwrap();
    session
}

fn run(session: &mut Session<MemoryStorage>, line: &str) -> CommandResult<Vec<Report>> {
    match session.handle_line(line) {
        LineOutcome::Executed { result, .. } => result,
        LineOutcome::Invalid => panic!("line was not recognised: {line}"),
    }
}

fn book_count(session: &Session<MemoryStorage>) -> usize {
    session.library().unwrap().books().len()
}

fn rating_count(session: &Session<MemoryStorage>) -> usize {
    session.library().unwrap().ratings().len()
}

#[test]
fn harry_potter_rating_lifecycle() {
    let mut session = session();

    run(&mut session, "add book Harry Potter /by JK Rowling").unwrap();
    let books = session.library().unwrap().books();
    assert_eq!(books.len(), 1);
    let book = books.get(0).unwrap();
    assert_eq!(book.title, "Harry Potter");
    assert_eq!(book.author.name, "JK Rowling");

    run(&mut session, "add rating 5 Harry Potter").unwrap();
    let rating = session.library().unwrap().ratings().get(0).unwrap().clone();
    assert_eq!((rating.score, rating.title.as_str()), (5, "Harry Potter"));

    let err = run(&mut session, "add rating 4 Harry Potter").unwrap_err();
    assert_eq!(err, CommandError::DuplicateRating("Harry Potter".to_string()));
    assert_eq!(rating_count(&session), 1);
    assert_eq!(
        session.library().unwrap().ratings().get(0).unwrap().score,
        5
    );

    let reports = run(&mut session, "edit rating 3 Harry Potter").unwrap();
    assert_eq!(
        reports,
        vec![Report::RatingUpdated {
            score: 3,
            title: "Harry Potter".to_string(),
        }]
    );

    run(&mut session, "delete book Harry Potter /by JK Rowling").unwrap();
    assert_eq!(book_count(&session), 0);
    assert_eq!(rating_count(&session), 0);
}

#[test]
fn added_books_are_findable_by_exact_title_and_author() {
    let mut session = session();
    let pairs = [
        ("Dune", "Frank Herbert"),
        ("The Left Hand of Darkness", "Ursula K. Le Guin"),
        ("1984", "George Orwell"),
    ];

    for (count, (title, author)) in pairs.iter().enumerate() {
        run(&mut session, &format!("add book {title} /by {author}")).unwrap();
        assert_eq!(book_count(&session), count + 1);

        let book = session
            .library()
            .unwrap()
            .books()
            .find_by_title(title)
            .unwrap();
        assert_eq!(book.title, *title);
        assert_eq!(book.author.name, *author);
    }
}

#[test]
fn duplicate_title_is_rejected() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();

    let err = run(&mut session, "add book Dune /by Someone Else").unwrap_err();

    assert_eq!(err, CommandError::DuplicateBook("Dune".to_string()));
    assert_eq!(book_count(&session), 1);
}

#[test]
fn out_of_range_scores_never_touch_ratings() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();

    for score in [-3_i64, 0, 6, 100] {
        let err = run(&mut session, &format!("add rating {score} Dune")).unwrap_err();
        assert_eq!(err, CommandError::InvalidScore(score));
        assert_eq!(rating_count(&session), 0);
    }

    let err = run(&mut session, "add rating five Dune").unwrap_err();
    assert_eq!(err, CommandError::InvalidNumberFormat("five".to_string()));
}

#[test]
fn rating_requires_an_existing_book() {
    let mut session = session();

    let err = run(&mut session, "add rating 4 Missing").unwrap_err();

    assert_eq!(err, CommandError::not_found(ListKind::Book, "Missing"));
    assert_eq!(rating_count(&session), 0);
}

#[test]
fn tagging_same_book_twice_keeps_one_membership() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();

    run(&mut session, "add category scifi Dune").unwrap();
    let reports = run(&mut session, "add category scifi Dune").unwrap();

    assert!(!reports
        .iter()
        .any(|report| matches!(report, Report::CategoryCreated(_))));
    let library = session.library().unwrap();
    let category = library.categories().find_by_name("scifi").unwrap();
    assert_eq!(category.books.len(), 1);
    assert_eq!(library.categories().len(), 1);
    assert!(library.is_consistent());
}

#[test]
fn tag_then_untag_restores_both_sides() {
    let mut session = session();
    run(&mut session, "add book Harry Potter /by JK Rowling").unwrap();
    run(&mut session, "add category fantasy").unwrap();

    run(&mut session, "add category fantasy Harry Potter -1").unwrap();
    {
        let library = session.library().unwrap();
        let category = library.categories().find_by_name("fantasy").unwrap();
        let book = library.books().find_by_title("Harry Potter").unwrap();
        assert_eq!(book.category, Some(category.id));
        assert!(category.books.contains(&book.id));
    }

    let reports = run(&mut session, "delete category fantasy Harry Potter -1").unwrap();
    assert_eq!(
        reports,
        vec![Report::CategoryRemovedFromBook {
            category: "fantasy".to_string(),
            title: "Harry Potter".to_string(),
        }]
    );

    let library = session.library().unwrap();
    let category = library.categories().find_by_name("fantasy").unwrap();
    assert!(category.books.is_empty());
    assert_eq!(library.books().find_by_title("Harry Potter").unwrap().category, None);
}

#[test]
fn retagging_moves_book_between_categories() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add category scifi Dune").unwrap();

    run(&mut session, "add category classics Dune").unwrap();

    let library = session.library().unwrap();
    assert!(library.categories().find_by_name("scifi").unwrap().books.is_empty());
    assert_eq!(
        library.categories().find_by_name("classics").unwrap().books.len(),
        1
    );
    assert!(library.is_consistent());
}

#[test]
fn bad_quote_number_keeps_book_link_and_warns() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add quote Fear is the mind-killer /by Frank Herbert").unwrap();

    let reports = run(&mut session, "add category scifi Dune 5").unwrap();

    assert!(reports.contains(&Report::CategoryTaggedBook {
        category: "scifi".to_string(),
        title: "Dune".to_string(),
    }));
    assert!(reports.contains(&Report::Warning(CommandError::InvalidQuoteIndex(5))));
    assert_eq!(
        reports.last(),
        Some(&Report::CategorySize {
            category: "scifi".to_string(),
            books: 1,
            quotes: 0,
        })
    );
}

#[test]
fn quote_number_zero_is_not_the_first_quote() {
    let mut session = session();
    run(&mut session, "add quote Stay hungry").unwrap();

    let reports = run(&mut session, "add category mottos - 0").unwrap();

    assert!(reports.contains(&Report::Warning(CommandError::InvalidQuoteIndex(0))));
    let library = session.library().unwrap();
    assert_eq!(library.quotes().get(0).unwrap().category, None);
}

#[test]
fn quote_numbers_are_one_based() {
    let mut session = session();
    run(&mut session, "add quote first").unwrap();
    run(&mut session, "add quote second").unwrap();

    run(&mut session, "add category picks - 2").unwrap();

    let library = session.library().unwrap();
    let picks = library.categories().find_by_name("picks").unwrap();
    assert_eq!(library.quotes().get(0).unwrap().category, None);
    assert_eq!(library.quotes().get(1).unwrap().category, Some(picks.id));
}

#[test]
fn partial_untag_reports_warning_for_untagged_side() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add quote Fear is the mind-killer").unwrap();
    run(&mut session, "add category scifi Dune").unwrap();

    let reports = run(&mut session, "delete category scifi Dune 1").unwrap();

    assert_eq!(reports.len(), 2);
    assert!(matches!(reports[0], Report::CategoryRemovedFromBook { .. }));
    assert!(matches!(
        reports[1],
        Report::Warning(CommandError::NotTagged {
            kind: ListKind::Quote,
            ..
        })
    ));
}

#[test]
fn untag_fails_when_nothing_was_tagged() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add category scifi").unwrap();

    let err = run(&mut session, "delete category scifi Dune").unwrap_err();

    assert!(matches!(
        err,
        CommandError::NotTagged {
            kind: ListKind::Book,
            ..
        }
    ));
}

#[test]
fn deleting_category_clears_every_member() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add quote Fear is the mind-killer").unwrap();
    run(&mut session, "add category scifi Dune 1").unwrap();

    let reports = run(&mut session, "delete category scifi").unwrap();

    assert_eq!(reports, vec![Report::CategoryDeleted("scifi".to_string())]);
    let library = session.library().unwrap();
    assert!(library.categories().is_empty());
    assert_eq!(library.books().get(0).unwrap().category, None);
    assert_eq!(library.quotes().get(0).unwrap().category, None);
}

#[test]
fn deleting_unknown_category_is_not_found() {
    let mut session = session();

    let err = run(&mut session, "delete category ghosts").unwrap_err();

    assert_eq!(err, CommandError::not_found(ListKind::Category, "ghosts"));
}

#[test]
fn deleting_book_removes_only_its_own_rating() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add book Emma /by Jane Austen").unwrap();
    run(&mut session, "add rating 4 Dune").unwrap();
    run(&mut session, "add rating 2 Emma").unwrap();

    run(&mut session, "delete book Dune /by Frank Herbert").unwrap();

    let ratings = session.library().unwrap().ratings();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings.get(0).unwrap().title, "Emma");
}

#[test]
fn deleting_missing_book_changes_nothing() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add rating 4 Dune").unwrap();

    let err = run(&mut session, "delete book Dune /by Brian Herbert").unwrap_err();

    assert!(matches!(
        err,
        CommandError::NotFound {
            kind: ListKind::Book,
            ..
        }
    ));
    assert_eq!(book_count(&session), 1);
    assert_eq!(rating_count(&session), 1);
}

#[test]
fn deleting_book_drops_its_bookmark_and_membership() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add bookmark Dune /pg 120").unwrap();
    run(&mut session, "add category scifi Dune").unwrap();

    run(&mut session, "delete book Dune /by Frank Herbert").unwrap();

    let library = session.library().unwrap();
    assert!(library.bookmarks().is_empty());
    assert!(library.categories().find_by_name("scifi").unwrap().books.is_empty());
    assert!(library.is_consistent());
}

#[test]
fn edit_book_rekeys_rating() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add rating 5 Dune").unwrap();

    let reports = run(&mut session, "edit book 1 /edit Dune Messiah").unwrap();

    assert_eq!(
        reports,
        vec![Report::BookEdited {
            old_title: "Dune".to_string(),
            new_title: "Dune Messiah".to_string(),
        }]
    );
    let library = session.library().unwrap();
    assert!(library.ratings().is_rated("Dune Messiah"));
    assert!(!library.ratings().is_rated("Dune"));
}

#[test]
fn edit_book_validates_before_writing() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add book Emma /by Jane Austen").unwrap();

    assert_eq!(
        run(&mut session, "edit book 0 /edit Other").unwrap_err(),
        CommandError::InvalidIndex {
            kind: ListKind::Book,
            index: 0,
        }
    );
    assert_eq!(
        run(&mut session, "edit book 2 /edit Dune").unwrap_err(),
        CommandError::DuplicateBook("Dune".to_string())
    );
    assert_eq!(
        run(&mut session, "edit book 1").unwrap_err(),
        CommandError::MissingRequiredField("new title")
    );
    assert_eq!(
        session.library().unwrap().books().get(1).unwrap().title,
        "Emma"
    );
}

#[test]
fn edit_quote_keeps_category_link() {
    let mut session = session();
    run(&mut session, "add quote Old words /from Somewhere").unwrap();
    run(&mut session, "add category notes - 1").unwrap();

    run(&mut session, "edit quote 1 /edit New words /by Someone").unwrap();

    let library = session.library().unwrap();
    let quote = library.quotes().get(0).unwrap();
    assert_eq!(quote.text, "New words");
    assert_eq!(quote.reference, None);
    assert_eq!(quote.author.as_ref().map(|a| a.name.as_str()), Some("Someone"));
    assert!(quote.category.is_some());
    assert!(library.is_consistent());
}

#[test]
fn edit_category_checks_existence_then_collision() {
    let mut session = session();
    run(&mut session, "add category scifi").unwrap();
    run(&mut session, "add category fantasy").unwrap();

    assert_eq!(
        run(&mut session, "edit category horror /edit fantasy").unwrap_err(),
        CommandError::not_found(ListKind::Category, "horror")
    );
    assert_eq!(
        run(&mut session, "edit category scifi /edit fantasy").unwrap_err(),
        CommandError::CategoryNameCollision("fantasy".to_string())
    );

    run(&mut session, "edit category scifi /edit speculative").unwrap();
    let categories = session.library().unwrap().categories();
    assert!(categories.exists("speculative"));
    assert!(!categories.exists("scifi"));
}

#[test]
fn edit_category_rejects_multi_word_name() {
    let mut session = session();
    run(&mut session, "add category scifi").unwrap();

    let err = run(&mut session, "edit category scifi /edit science fiction").unwrap_err();

    assert_eq!(
        err,
        CommandError::InvalidCategoryName("science fiction".to_string())
    );
    let categories = session.library().unwrap().categories();
    assert!(categories.exists("scifi"));
    assert!(!categories.exists("science fiction"));
    run(&mut session, "delete category scifi").unwrap();
}

#[test]
fn edit_rating_checks_score_before_lookup() {
    let mut session = session();

    assert_eq!(
        run(&mut session, "edit rating 9 Missing").unwrap_err(),
        CommandError::InvalidScore(9)
    );
    assert_eq!(
        run(&mut session, "edit rating 3 Missing").unwrap_err(),
        CommandError::not_found(ListKind::Rating, "Missing")
    );
}

#[test]
fn todo_and_bookmark_cannot_be_edited() {
    let mut session = session();

    let err = run(&mut session, "edit todo 1 /edit anything").unwrap_err();

    assert!(matches!(
        err,
        CommandError::UnsupportedOperation {
            kind: ListKind::ToDo,
            ..
        }
    ));
}

#[test]
fn bookmark_moves_instead_of_duplicating() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();

    run(&mut session, "add bookmark Dune /pg 10").unwrap();
    let reports = run(&mut session, "add bookmark Dune /pg 42").unwrap();

    assert_eq!(
        reports,
        vec![Report::BookmarkUpdated {
            title: "Dune".to_string(),
            page: 42,
        }]
    );
    let bookmarks = session.library().unwrap().bookmarks();
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks.get(0).unwrap().page, 42);
}

#[test]
fn todo_lifecycle() {
    let mut session = session();
    run(&mut session, "add todo finish Dune /by Friday").unwrap();

    let reports = run(&mut session, "done todo 1").unwrap();
    match &reports[0] {
        Report::ToDoCompleted { number, todo } => {
            assert_eq!(*number, 1);
            assert!(todo.is_completed);
            assert_eq!(todo.deadline.as_deref(), Some("Friday"));
        }
        other => panic!("unexpected report: {other:?}"),
    }

    assert_eq!(
        run(&mut session, "delete todo 2").unwrap_err(),
        CommandError::InvalidIndex {
            kind: ListKind::ToDo,
            index: 2,
        }
    );
    run(&mut session, "delete todo 1").unwrap();
    assert!(session.library().unwrap().todos().is_empty());
}

#[test]
fn list_filters_by_category_and_find_keeps_numbers() {
    let mut session = session();
    run(&mut session, "add book Dune /by Frank Herbert").unwrap();
    run(&mut session, "add book Emma /by Jane Austen").unwrap();
    run(&mut session, "add quote nothing here").unwrap();
    run(&mut session, "add quote Fear is the mind-killer").unwrap();
    run(&mut session, "add category scifi Dune").unwrap();

    let reports = run(&mut session, "list book scifi").unwrap();
    match &reports[0] {
        Report::Books(books) => {
            assert_eq!(books.len(), 1);
            assert_eq!(books[0].title, "Dune");
        }
        other => panic!("unexpected report: {other:?}"),
    }

    let reports = run(&mut session, "find quote FEAR").unwrap();
    match &reports[0] {
        Report::Quotes(quotes) => {
            assert_eq!(quotes.len(), 1);
            assert_eq!(quotes[0].0, 2);
        }
        other => panic!("unexpected report: {other:?}"),
    }

    assert_eq!(
        run(&mut session, "list book horror").unwrap_err(),
        CommandError::not_found(ListKind::Category, "horror")
    );
}

#[test]
fn malformed_lines() {
    let mut session = session();

    assert!(matches!(session.handle_line(""), LineOutcome::Invalid));
    assert!(matches!(session.handle_line("hello there"), LineOutcome::Invalid));
    assert_eq!(
        run(&mut session, "add").unwrap_err(),
        CommandError::MissingRequiredField("type")
    );
    assert_eq!(
        run(&mut session, "add novel Dune").unwrap_err(),
        CommandError::UnknownEntityType("novel".to_string())
    );
    assert_eq!(
        run(&mut session, "add book /by Frank Herbert").unwrap_err(),
        CommandError::MissingRequiredField("book title")
    );
    assert!(session.handle_line("bye").is_exit());
}
