//! Scope of the admin post index.
//!
//! Posts shadowed by a child draft are hidden (the draft is listed instead).
//! With localization enabled, only posts in the active locale are listed,
//! plus posts whose locale the host does not know, so they cannot get lost.
//!
//! The scope is available as an in-memory predicate and as a SeaQuery
//! statement for hosts that filter in the database.

use postwright_kernel::BlogConfig;
use postwright_sdk::types::Post;
use sea_query::{Alias, Asterisk, Cond, Expr, ExprTrait, PostgresQueryBuilder, Query, SelectStatement};
use tracing::warn;

/// Locales supplied by the host's localization layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFilter {
    pub active: String,
    pub known: Vec<String>,
}

/// Filter applied to the admin list of posts.
#[derive(Debug, Clone)]
pub struct IndexScope {
    table: String,
    localization: bool,
    locales: Option<LocaleFilter>,
}

impl IndexScope {
    /// Scope for the configured posts table, without locale filtering.
    pub fn new(config: &BlogConfig) -> Self {
        Self {
            table: config.posts_table.clone(),
            localization: config.localization,
            locales: None,
        }
    }

    /// Supply the active and known locales.
    ///
    /// Ignored unless localization is enabled in the configuration.
    pub fn with_locales(
        mut self,
        active: impl Into<String>,
        known: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.locales = Some(LocaleFilter {
            active: active.into(),
            known: known.into_iter().map(Into::into).collect(),
        });
        self
    }

    fn locale_filter(&self) -> Option<&LocaleFilter> {
        self.locales.as_ref().filter(|_| self.localization)
    }

    /// Localization is enabled but the host never supplied locales, so the
    /// index would list every locale.
    pub fn missing_locales(&self) -> bool {
        self.localization && self.locales.is_none()
    }

    fn warn_if_missing_locales(&self) {
        if self.missing_locales() {
            warn!(
                table = %self.table,
                "localization enabled but no locales supplied; index is not filtered by locale"
            );
        }
    }

    /// Whether a post belongs in the index.
    pub fn matches(&self, post: &Post) -> bool {
        if post.has_child_draft {
            return false;
        }

        let Some(filter) = self.locale_filter() else {
            return true;
        };

        // A missing locale never matches, mirroring SQL NULL comparison
        match post.locale.as_deref() {
            None => false,
            Some(locale) => locale == filter.active || !filter.known.iter().any(|k| k == locale),
        }
    }

    /// Posts that belong in the index, in input order.
    pub fn filter<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        self.warn_if_missing_locales();
        posts.iter().filter(|post| self.matches(post)).collect()
    }

    /// The scope as a SELECT over the posts table.
    pub fn select(&self) -> SelectStatement {
        self.warn_if_missing_locales();
        let table = Alias::new(&self.table);
        let child = Alias::new("child_draft");

        let child_drafts = Query::select()
            .column((child.clone(), Alias::new("id")))
            .from_as(table.clone(), child.clone())
            .and_where(
                Expr::col((child.clone(), Alias::new("draft_parent_id")))
                    .equals((table.clone(), Alias::new("id"))),
            )
            .to_owned();

        let mut query = Query::select();
        query
            .column(Asterisk)
            .from(table.clone())
            .cond_where(Cond::all().add(Expr::exists(child_drafts)).not());

        if let Some(filter) = self.locale_filter() {
            let locale = || Expr::col((table.clone(), Alias::new("locale")));
            let mut any = Cond::any().add(locale().eq(filter.active.clone()));
            any = if filter.known.is_empty() {
                any.add(locale().is_not_null())
            } else {
                any.add(locale().is_not_in(filter.known.iter().cloned()))
            };
            query.cond_where(any);
        }

        query
    }

    /// The scope query rendered for PostgreSQL.
    pub fn build(&self) -> String {
        self.select().to_string(PostgresQueryBuilder)
    }
}
