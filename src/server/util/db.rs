use sea_orm::{
    sea_query::{LikeExpr, SimpleExpr},
    ColumnTrait, DbErr, SqlErr,
};

use crate::server::{error::AppError, util::text::escape_like};

/// `column LIKE '%needle%'` with `%` and `_` in `needle` matched literally.
pub fn contains_literal<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    column.like(LikeExpr::new(format!("%{}%", escape_like(needle))).escape('\\'))
}

/// Converts a unique constraint violation into `AppError::Conflict` with `message`.
///
/// Any other database error is passed through as `AppError::DbErr`.
pub fn map_unique_violation(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint violated: {}", detail);
            AppError::Conflict(message.to_string())
        }
        _ => AppError::DbErr(err),
    }
}

/// Same as `map_unique_violation` for repository calls that already return `AppError`.
pub fn map_app_unique_violation(err: AppError, message: &str) -> AppError {
    match err {
        AppError::DbErr(err) => map_unique_violation(err, message),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveModelTrait, ActiveValue};
    use test_utils::{builder::TestBuilder, factory};

    /// Tests that a duplicate username is reported as a conflict.
    ///
    /// Expected: AppError::Conflict carrying the supplied message
    #[tokio::test]
    async fn maps_unique_violation_to_conflict() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let existing = factory::user::create_user(db).await?;

        let err = entity::user::ActiveModel {
            provider_id: ActiveValue::Set("another-provider".to_string()),
            username: ActiveValue::Set(existing.username.clone()),
            display_name: ActiveValue::Set("Copy".to_string()),
            admin: ActiveValue::Set(false),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap_err();

        match map_unique_violation(err, "username taken") {
            AppError::Conflict(msg) => assert_eq!(msg, "username taken"),
            e => panic!("Expected Conflict, got: {:?}", e),
        }

        Ok(())
    }

    #[test]
    fn passes_other_errors_through() {
        let err = map_unique_violation(DbErr::Custom("boom".to_string()), "unused");
        assert!(matches!(err, AppError::DbErr(_)));
    }
}
