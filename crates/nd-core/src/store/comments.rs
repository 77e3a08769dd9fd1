use super::{filled_or, RecordStore};
use crate::error::{Result, StoreError};
use crate::models::{new_id, Comment, NewComment, NewReply, Reaction, Reply};
use crate::slots::Slot;
use chrono::Utc;
use tracing::info;

const COMMENT: &str = "Comment";

impl RecordStore {
    /// Comments in arrival order, optionally for one article only.
    /// An unreadable comments slot reads as empty.
    pub fn comments(&self, article_id: Option<&str>) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self.load_degraded(Slot::Comments);
        if let Some(article_id) = article_id {
            comments.retain(|c| c.article_id == article_id);
        }
        comments
    }

    pub fn comment_count(&self, article_id: &str) -> usize {
        self.comments(Some(article_id)).len()
    }

    pub fn add_comment(&mut self, fields: NewComment) -> Result<Comment> {
        if fields.article_id.trim().is_empty() {
            return Err(StoreError::ValidationError(
                "comment needs an article id".to_string(),
            ));
        }

        let mut comments: Vec<Comment> = self.load_or_default(Slot::Comments)?;
        let comment = Comment {
            id: new_id(),
            article_id: fields.article_id,
            author: filled_or(fields.author, &self.options.defaults.author),
            content: fields.content,
            timestamp: Utc::now(),
            likes: 0,
            dislikes: 0,
            replies: Vec::new(),
        };
        comments.push(comment.clone());

        let max = self.options.limits.max_comments;
        if comments.len() > max {
            comments.drain(..comments.len() - max);
        }
        self.save(Slot::Comments, &comments)?;

        info!(id = %comment.id, article_id = %comment.article_id, "comment added");
        Ok(comment)
    }

    pub fn react(&mut self, comment_id: &str, reaction: Reaction) -> Result<Comment> {
        self.with_comment(comment_id, |comment| {
            match reaction {
                Reaction::Like => comment.likes += 1,
                Reaction::Dislike => comment.dislikes += 1,
            }
            comment.clone()
        })
    }

    pub fn add_reply(&mut self, comment_id: &str, fields: NewReply) -> Result<Reply> {
        let reply = Reply {
            id: new_id(),
            content: fields.content,
            author: filled_or(fields.author, &self.options.defaults.author),
            timestamp: Utc::now(),
        };
        let added = self.with_comment(comment_id, |comment| {
            comment.replies.push(reply.clone());
            reply
        })?;

        info!(id = %added.id, comment_id, "reply added");
        Ok(added)
    }

    fn with_comment<T>(&mut self, comment_id: &str, edit: impl FnOnce(&mut Comment) -> T) -> Result<T> {
        let mut comments: Vec<Comment> = self.load_or_default(Slot::Comments)?;
        let comment = comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| StoreError::not_found(COMMENT, comment_id))?;
        let out = edit(comment);
        self.save(Slot::Comments, &comments)?;
        Ok(out)
    }
}
