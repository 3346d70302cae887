use articles_core::db::open_pool_in_memory;
use articles_core::{
    Article, ArticleRepository, CommentRepository, NewArticle, NewComment, RepoError,
    SqliteRepository,
};
use chrono::Utc;

fn repo() -> SqliteRepository {
    SqliteRepository::new(open_pool_in_memory().unwrap())
}

fn seed_article(repo: &SqliteRepository, title: &str) -> Article {
    let mut article = NewArticle::new(title, "body");
    article.creation_timestamp = Some(Utc::now());
    repo.create_article(&article).unwrap()
}

fn stamped(article_id: i64, author: &str, content: &str) -> NewComment {
    let mut comment = NewComment::new(article_id, author, content);
    comment.creation_timestamp = Some(Utc::now());
    comment
}

#[test]
fn create_comment_returns_generated_id() {
    let repo = repo();
    let article = seed_article(&repo, "parent");

    let comment = repo
        .create_comment(&stamped(article.id, "Ahmed", "hi"))
        .unwrap();
    assert!(comment.id > 0);
    assert_eq!(comment.article_id, article.id);
    assert_eq!(comment.author, "Ahmed");
    assert_eq!(comment.content, "hi");
}

#[test]
fn create_comment_for_unknown_article_is_reference_violation() {
    let repo = repo();

    let err = repo
        .create_comment(&stamped(999_999, "x", "y"))
        .unwrap_err();
    assert!(matches!(err, RepoError::ArticleReferenceViolation(999_999)));
}

#[test]
fn comments_are_filtered_by_article() {
    let repo = repo();
    let first = seed_article(&repo, "first");
    let second = seed_article(&repo, "second");

    let a = repo.create_comment(&stamped(first.id, "a", "1")).unwrap();
    let b = repo.create_comment(&stamped(second.id, "b", "2")).unwrap();
    let c = repo.create_comment(&stamped(first.id, "c", "3")).unwrap();

    assert_eq!(
        repo.get_comments_by_article_id(first.id).unwrap(),
        vec![a, c]
    );
    assert_eq!(repo.get_comments_by_article_id(second.id).unwrap(), vec![b]);
}

#[test]
fn comments_for_unknown_article_are_empty() {
    let repo = repo();
    assert!(repo.get_comments_by_article_id(42).unwrap().is_empty());
}

#[test]
fn identical_comment_creates_produce_distinct_rows() {
    let repo = repo();
    let article = seed_article(&repo, "parent");
    let draft = stamped(article.id, "same", "same");

    let first = repo.create_comment(&draft).unwrap();
    let second = repo.create_comment(&draft).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(repo.get_comments_by_article_id(article.id).unwrap().len(), 2);
}
