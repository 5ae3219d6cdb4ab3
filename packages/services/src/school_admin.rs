//! School admin operations: academic terms.

use chrono::NaiveDate;
use db::Repository;
use school_core::{ApiResult, ListParams, Paginated, School, SchoolId, Term, TermId, TermInput};

use crate::admin::AdminApi;
use crate::error::{ServiceError, ServiceResult, require};

/// Validated term fields.
struct TermFields {
    school_id: SchoolId,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl<R: Repository> AdminApi<R> {
    /// Terms, optionally limited to one school.
    pub async fn get_terms(
        &self,
        params: ListParams,
        school_id: Option<SchoolId>,
    ) -> ApiResult<Paginated<Term>> {
        self.call("get_terms", async {
            Ok(self
                .list_records::<Term, _>(&params, |t| school_id.is_none_or(|id| t.school_id == id))
                .await)
        })
        .await
    }

    /// Create a term. Terms of one school may not overlap.
    pub async fn create_term(&self, input: TermInput) -> ApiResult<Term> {
        self.call("create_term", async {
            let fields = self.validate_term(&input, None).await?;

            let term = Term::new(fields.school_id, fields.name, fields.start_date, fields.end_date);
            let term = self.repo.insert(&term).await?;
            let term = if input.is_current.unwrap_or(false) {
                self.make_current(term).await?
            } else {
                term
            };

            self.audit("term.create", "term", term.id, format!("Created term {}", term.name))
                .await;
            Ok(term)
        })
        .await
    }

    pub async fn update_term(&self, id: TermId, input: TermInput) -> ApiResult<Term> {
        self.call("update_term", async {
            let mut term = self.fetch::<Term>(id, "Term").await?;
            let fields = self.validate_term(&input, Some(id)).await?;

            term.school_id = fields.school_id;
            term.name = fields.name;
            term.start_date = fields.start_date;
            term.end_date = fields.end_date;

            let mut term = self.repo.update(&term).await?;
            match input.is_current {
                Some(true) if !term.is_current => term = self.make_current(term).await?,
                Some(false) if term.is_current => {
                    term.is_current = false;
                    term = self.repo.update(&term).await?;
                }
                _ => {}
            }

            self.audit("term.update", "term", term.id, format!("Updated term {}", term.name))
                .await;
            Ok(term)
        })
        .await
    }

    /// Mark a term as the school's current one, clearing the flag elsewhere.
    pub async fn set_current_term(&self, id: TermId) -> ApiResult<Term> {
        self.call("set_current_term", async {
            let term = self.fetch::<Term>(id, "Term").await?;
            let term = self.make_current(term).await?;
            self.audit("term.current", "term", term.id, format!("{} is now the current term", term.name))
                .await;
            Ok(term)
        })
        .await
    }

    pub async fn delete_term(&self, id: TermId) -> ApiResult<()> {
        self.call("delete_term", async {
            let term = self.fetch::<Term>(id, "Term").await?;
            self.repo.delete::<Term>(&id.to_string()).await?;
            self.audit("term.delete", "term", id, format!("Deleted term {}", term.name))
                .await;
            Ok(())
        })
        .await
    }

    async fn make_current(&self, mut term: Term) -> ServiceResult<Term> {
        let school_id = term.school_id;
        let others = self
            .repo
            .find::<Term, _>(|t| t.school_id == school_id && t.is_current && t.id != term.id)
            .await?;
        for mut other in others {
            other.is_current = false;
            self.repo.update(&other).await?;
        }

        term.is_current = true;
        Ok(self.repo.update(&term).await?)
    }

    async fn validate_term(&self, input: &TermInput, existing: Option<TermId>) -> ServiceResult<TermFields> {
        let school_id = input
            .school_id
            .ok_or_else(|| ServiceError::validation("School is required"))?;
        require(&input.name, "Term name is required")?;
        let start_date = input
            .start_date
            .ok_or_else(|| ServiceError::validation("Start date is required"))?;
        let end_date = input
            .end_date
            .ok_or_else(|| ServiceError::validation("End date is required"))?;
        if start_date >= end_date {
            return Err(ServiceError::validation("Start date must be before end date"));
        }

        self.fetch::<School>(school_id, "School").await?;

        let overlapping = self
            .repo
            .find::<Term, _>(|t| {
                t.school_id == school_id
                    && Some(t.id) != existing
                    && t.start_date <= end_date
                    && start_date <= t.end_date
            })
            .await?;
        if let Some(other) = overlapping.first() {
            return Err(ServiceError::conflict(format!("Term overlaps with {}", other.name)));
        }

        Ok(TermFields {
            school_id,
            name: input.name.trim().to_string(),
            start_date,
            end_date,
        })
    }
}
