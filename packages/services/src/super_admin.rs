//! Super admin operations: schools, branches, users, plans, audit logs and
//! platform statistics.

use db::Repository;
use futures_util::future::try_join5;
use school_core::{
    ApiResult, AuditLog, BillingCycle, Branch, BranchId, BranchInput, BranchStatus, ListParams,
    Paginated, Plan, PlanId, PlanInput, PlatformStats, School, SchoolId, SchoolInput, SchoolStatus,
    SortDirection, SupportTicket, Term, User, UserId, UserInput, UserStatus,
};

use crate::admin::AdminApi;
use crate::error::{ServiceError, ServiceResult, require};

impl<R: Repository> AdminApi<R> {
    // Schools

    pub async fn get_schools(&self, params: ListParams) -> ApiResult<Paginated<School>> {
        self.call("get_schools", async {
            Ok(self.list_records::<School, _>(&params, |_| true).await)
        })
        .await
    }

    pub async fn get_school(&self, id: SchoolId) -> ApiResult<School> {
        self.call("get_school", self.fetch::<School>(id, "School")).await
    }

    /// Create a school. New schools start `pending` unless a status is given.
    pub async fn create_school(&self, input: SchoolInput) -> ApiResult<School> {
        self.call("create_school", async {
            self.validate_school(&input).await?;

            let mut school = School::new(input.name.trim(), input.location.trim())
                .with_contact(input.contact_email.trim(), input.contact_phone.trim())
                .with_students(input.students.unwrap_or(0))
                .with_status(input.status.unwrap_or_default());
            school.plan_id = input.plan_id;

            let school = self.repo.insert(&school).await?;
            self.audit("school.create", "school", school.id, format!("Created school {}", school.name))
                .await;
            tracing::info!(school_id = %school.id, "Created school");
            Ok(school)
        })
        .await
    }

    pub async fn update_school(&self, id: SchoolId, input: SchoolInput) -> ApiResult<School> {
        self.call("update_school", async {
            let mut school = self.fetch::<School>(id, "School").await?;
            self.validate_school(&input).await?;

            school.name = input.name.trim().to_string();
            school.location = input.location.trim().to_string();
            school.contact_email = input.contact_email.trim().to_string();
            school.contact_phone = input.contact_phone.trim().to_string();
            school.plan_id = input.plan_id;
            if let Some(status) = input.status {
                school.status = status;
            }
            if let Some(students) = input.students {
                school.students = students;
            }

            let school = self.repo.update(&school).await?;
            self.audit("school.update", "school", school.id, format!("Updated school {}", school.name))
                .await;
            Ok(school)
        })
        .await
    }

    /// Delete a school together with its branches and terms. Its users are
    /// deactivated.
    pub async fn delete_school(&self, id: SchoolId) -> ApiResult<()> {
        self.call("delete_school", async {
            let school = self.fetch::<School>(id, "School").await?;

            let branches = self.repo.find::<Branch, _>(|b| b.school_id == id).await?;
            for branch in &branches {
                self.repo.delete::<Branch>(&branch.id.to_string()).await?;
            }

            let terms = self.repo.find::<Term, _>(|t| t.school_id == id).await?;
            for term in &terms {
                self.repo.delete::<Term>(&term.id.to_string()).await?;
            }

            let users = self.repo.find::<User, _>(|u| u.school_id == Some(id)).await?;
            for mut user in users {
                user.status = UserStatus::Inactive;
                user.branch_id = None;
                self.repo.update(&user).await?;
            }

            self.repo.delete::<School>(&id.to_string()).await?;
            self.audit(
                "school.delete",
                "school",
                id,
                format!("Deleted school {} and {} branches", school.name, branches.len()),
            )
            .await;
            tracing::info!(school_id = %id, branches = branches.len(), "Deleted school");
            Ok(())
        })
        .await
    }

    pub async fn set_school_status(&self, id: SchoolId, status: SchoolStatus) -> ApiResult<School> {
        self.call("set_school_status", async {
            let mut school = self.fetch::<School>(id, "School").await?;
            let previous = school.status;
            school.status = status;

            let school = self.repo.update(&school).await?;
            self.audit(
                "school.status",
                "school",
                school.id,
                format!("Status changed from {} to {}", previous.as_str(), status.as_str()),
            )
            .await;
            Ok(school)
        })
        .await
    }

    async fn validate_school(&self, input: &SchoolInput) -> ServiceResult<()> {
        require(&input.name, "School name is required")?;
        require(&input.location, "Location is required")?;

        let email = input.contact_email.trim();
        if !email.is_empty() && !is_valid_email(email) {
            return Err(ServiceError::validation("Contact email is invalid"));
        }

        if let Some(plan_id) = input.plan_id {
            self.fetch::<Plan>(plan_id, "Plan").await?;
        }
        Ok(())
    }

    // Branches

    /// Branches, optionally limited to one school.
    pub async fn get_branches(
        &self,
        params: ListParams,
        school_id: Option<SchoolId>,
    ) -> ApiResult<Paginated<Branch>> {
        self.call("get_branches", async {
            Ok(self
                .list_records::<Branch, _>(&params, |b| school_id.is_none_or(|id| b.school_id == id))
                .await)
        })
        .await
    }

    pub async fn create_branch(&self, input: BranchInput) -> ApiResult<Branch> {
        self.call("create_branch", async {
            let school_id = self.validate_branch(&input).await?;

            let mut branch = Branch::new(school_id, input.name.trim(), input.location.trim())
                .with_students(input.students.unwrap_or(0));
            branch.status = input.status.unwrap_or(BranchStatus::Active);

            let branch = self.repo.insert(&branch).await?;
            self.sync_branch_count(school_id).await?;
            self.audit("branch.create", "branch", branch.id, format!("Created branch {}", branch.name))
                .await;
            Ok(branch)
        })
        .await
    }

    pub async fn update_branch(&self, id: BranchId, input: BranchInput) -> ApiResult<Branch> {
        self.call("update_branch", async {
            let mut branch = self.fetch::<Branch>(id, "Branch").await?;
            let school_id = self.validate_branch(&input).await?;
            let moved_from = (branch.school_id != school_id).then_some(branch.school_id);

            branch.school_id = school_id;
            branch.name = input.name.trim().to_string();
            branch.location = input.location.trim().to_string();
            if let Some(students) = input.students {
                branch.students = students;
            }
            if let Some(status) = input.status {
                branch.status = status;
            }

            let branch = self.repo.update(&branch).await?;
            if let Some(previous) = moved_from {
                self.sync_branch_count(previous).await?;
                self.sync_branch_count(school_id).await?;
            }
            self.audit("branch.update", "branch", branch.id, format!("Updated branch {}", branch.name))
                .await;
            Ok(branch)
        })
        .await
    }

    pub async fn delete_branch(&self, id: BranchId) -> ApiResult<()> {
        self.call("delete_branch", async {
            let branch = self.fetch::<Branch>(id, "Branch").await?;
            self.repo.delete::<Branch>(&id.to_string()).await?;
            self.sync_branch_count(branch.school_id).await?;

            let users = self.repo.find::<User, _>(|u| u.branch_id == Some(id)).await?;
            for mut user in users {
                user.branch_id = None;
                self.repo.update(&user).await?;
            }

            self.audit("branch.delete", "branch", id, format!("Deleted branch {}", branch.name))
                .await;
            Ok(())
        })
        .await
    }

    async fn validate_branch(&self, input: &BranchInput) -> ServiceResult<SchoolId> {
        let school_id = input
            .school_id
            .ok_or_else(|| ServiceError::validation("School is required"))?;
        require(&input.name, "Branch name is required")?;
        require(&input.location, "Location is required")?;
        self.fetch::<School>(school_id, "School").await?;
        Ok(school_id)
    }

    /// Recompute `School::branches` from the branch table.
    async fn sync_branch_count(&self, school_id: SchoolId) -> ServiceResult<()> {
        let Some(mut school) = self.repo.get::<School>(&school_id.to_string()).await? else {
            return Ok(());
        };
        let count = self.repo.find::<Branch, _>(|b| b.school_id == school_id).await?.len();
        school.branches = u32::try_from(count).unwrap_or(u32::MAX);
        self.repo.update(&school).await?;
        Ok(())
    }

    // Users

    pub async fn get_users(&self, params: ListParams) -> ApiResult<Paginated<User>> {
        self.call("get_users", async {
            Ok(self.list_records::<User, _>(&params, |_| true).await)
        })
        .await
    }

    pub async fn get_user(&self, id: UserId) -> ApiResult<User> {
        self.call("get_user", self.fetch::<User>(id, "User")).await
    }

    /// Create a user. Emails are unique, ignoring case.
    pub async fn create_user(&self, input: UserInput) -> ApiResult<User> {
        self.call("create_user", async {
            let role = self.validate_user(&input, None).await?;

            let mut user = User::new(input.name.trim(), input.email.trim(), role);
            user.school_id = input.school_id;
            user.branch_id = input.branch_id;
            user.status = input.status.unwrap_or(UserStatus::Active);

            let user = self.repo.insert(&user).await?;
            self.audit(
                "user.create",
                "user",
                user.id,
                format!("Created {} {}", user.role.label(), user.email),
            )
            .await;
            Ok(user)
        })
        .await
    }

    pub async fn update_user(&self, id: UserId, input: UserInput) -> ApiResult<User> {
        self.call("update_user", async {
            let mut user = self.fetch::<User>(id, "User").await?;
            let role = self.validate_user(&input, Some(id)).await?;

            user.name = input.name.trim().to_string();
            user.email = input.email.trim().to_string();
            user.role = role;
            user.school_id = input.school_id;
            user.branch_id = input.branch_id;
            if let Some(status) = input.status {
                user.status = status;
            }

            let user = self.repo.update(&user).await?;
            self.audit("user.update", "user", user.id, format!("Updated {}", user.email))
                .await;
            Ok(user)
        })
        .await
    }

    pub async fn delete_user(&self, id: UserId) -> ApiResult<()> {
        self.call("delete_user", async {
            let user = self.fetch::<User>(id, "User").await?;
            self.repo.delete::<User>(&id.to_string()).await?;
            self.audit("user.delete", "user", id, format!("Deleted {}", user.email))
                .await;
            Ok(())
        })
        .await
    }

    async fn validate_user(
        &self,
        input: &UserInput,
        existing: Option<UserId>,
    ) -> ServiceResult<school_core::Role> {
        require(&input.name, "Name is required")?;
        require(&input.email, "Email is required")?;
        let email = input.email.trim();
        if !is_valid_email(email) {
            return Err(ServiceError::validation("Email is invalid"));
        }
        let role = input
            .role
            .ok_or_else(|| ServiceError::validation("Role is required"))?;

        match input.school_id {
            Some(school_id) => {
                self.fetch::<School>(school_id, "School").await?;
            }
            None if !role.is_platform() => {
                return Err(ServiceError::validation(format!(
                    "A school is required for the {} role",
                    role.label()
                )));
            }
            None => {}
        }

        if let Some(branch_id) = input.branch_id {
            let branch = self.fetch::<Branch>(branch_id, "Branch").await?;
            if Some(branch.school_id) != input.school_id {
                return Err(ServiceError::validation("Branch does not belong to the selected school"));
            }
        }

        let lowered = email.to_lowercase();
        let taken = self
            .repo
            .find::<User, _>(|u| u.email.to_lowercase() == lowered && Some(u.id) != existing)
            .await?;
        if !taken.is_empty() {
            return Err(ServiceError::conflict(format!("Email {email} is already in use")));
        }

        Ok(role)
    }

    // Plans

    pub async fn get_plans(&self, params: ListParams) -> ApiResult<Paginated<Plan>> {
        self.call("get_plans", async {
            Ok(self.list_records::<Plan, _>(&params, |_| true).await)
        })
        .await
    }

    pub async fn get_plan(&self, id: PlanId) -> ApiResult<Plan> {
        self.call("get_plan", self.fetch::<Plan>(id, "Plan")).await
    }

    pub async fn create_plan(&self, input: PlanInput) -> ApiResult<Plan> {
        self.call("create_plan", async {
            let price = self.validate_plan(&input, None).await?;

            let mut plan = Plan::new(
                input.name.trim(),
                price,
                input.billing_cycle.unwrap_or(BillingCycle::Monthly),
            )
            .with_limits(input.limits.clone().unwrap_or_default())
            .with_features(clean_features(&input.features));
            plan.is_active = input.is_active.unwrap_or(true);

            let plan = self.repo.insert(&plan).await?;
            self.audit("plan.create", "plan", plan.id, format!("Created plan {}", plan.name))
                .await;
            Ok(plan)
        })
        .await
    }

    pub async fn update_plan(&self, id: PlanId, input: PlanInput) -> ApiResult<Plan> {
        self.call("update_plan", async {
            let mut plan = self.fetch::<Plan>(id, "Plan").await?;
            let price = self.validate_plan(&input, Some(id)).await?;

            plan.name = input.name.trim().to_string();
            plan.price = price;
            if let Some(cycle) = input.billing_cycle {
                plan.billing_cycle = cycle;
            }
            if let Some(limits) = input.limits.clone() {
                plan.limits = limits;
            }
            plan.features = clean_features(&input.features);
            if let Some(active) = input.is_active {
                plan.is_active = active;
            }

            let plan = self.repo.update(&plan).await?;
            self.audit("plan.update", "plan", plan.id, format!("Updated plan {}", plan.name))
                .await;
            Ok(plan)
        })
        .await
    }

    /// Flip a plan between active and inactive.
    pub async fn toggle_plan(&self, id: PlanId) -> ApiResult<Plan> {
        self.call("toggle_plan", async {
            let mut plan = self.fetch::<Plan>(id, "Plan").await?;
            plan.is_active = !plan.is_active;

            let plan = self.repo.update(&plan).await?;
            let state = if plan.is_active { "Activated" } else { "Deactivated" };
            self.audit("plan.toggle", "plan", plan.id, format!("{state} plan {}", plan.name))
                .await;
            Ok(plan)
        })
        .await
    }

    /// Delete a plan no school is subscribed to.
    pub async fn delete_plan(&self, id: PlanId) -> ApiResult<()> {
        self.call("delete_plan", async {
            let plan = self.fetch::<Plan>(id, "Plan").await?;
            let subscribers = self.repo.find::<School, _>(|s| s.plan_id == Some(id)).await?;
            if !subscribers.is_empty() {
                return Err(ServiceError::conflict(format!(
                    "Plan {} is used by {} schools",
                    plan.name,
                    subscribers.len()
                )));
            }

            self.repo.delete::<Plan>(&id.to_string()).await?;
            self.audit("plan.delete", "plan", id, format!("Deleted plan {}", plan.name))
                .await;
            Ok(())
        })
        .await
    }

    async fn validate_plan(&self, input: &PlanInput, existing: Option<PlanId>) -> ServiceResult<f64> {
        require(&input.name, "Plan name is required")?;
        let price = input
            .price
            .ok_or_else(|| ServiceError::validation("Price is required"))?;
        if !price.is_finite() || price < 0.0 {
            return Err(ServiceError::validation("Price must be zero or more"));
        }

        let name = input.name.trim().to_lowercase();
        let taken = self
            .repo
            .find::<Plan, _>(|p| p.name.to_lowercase() == name && Some(p.id) != existing)
            .await?;
        if !taken.is_empty() {
            return Err(ServiceError::conflict(format!(
                "A plan named {} already exists",
                input.name.trim()
            )));
        }
        Ok(price)
    }

    // Audit logs

    /// Audit entries, newest first unless another order is requested.
    pub async fn get_audit_logs(&self, mut params: ListParams) -> ApiResult<Paginated<AuditLog>> {
        if params.sort_field.is_none() {
            params = params.sorted_by("timestamp", SortDirection::Desc);
        }
        self.call("get_audit_logs", async {
            Ok(self.list_records::<AuditLog, _>(&params, |_| true).await)
        })
        .await
    }

    // Dashboard

    pub async fn get_platform_stats(&self) -> ApiResult<PlatformStats> {
        self.call("get_platform_stats", async {
            let (schools, branches, users, plans, tickets) = try_join5(
                self.repo.list::<School>(),
                self.repo.count::<Branch>(),
                self.repo.count::<User>(),
                self.repo.list::<Plan>(),
                self.repo.list::<SupportTicket>(),
            )
            .await?;

            Ok(platform_stats(&schools, branches, users, &plans, &tickets))
        })
        .await
    }
}

pub(crate) fn platform_stats(
    schools: &[School],
    total_branches: usize,
    total_users: usize,
    plans: &[Plan],
    tickets: &[SupportTicket],
) -> PlatformStats {
    let by_status = |status: SchoolStatus| schools.iter().filter(|s| s.status == status).count();

    let monthly_revenue = schools
        .iter()
        .filter(|s| s.status == SchoolStatus::Active)
        .filter_map(|s| s.plan_id)
        .filter_map(|id| plans.iter().find(|p| p.id == id))
        .map(|plan| match plan.billing_cycle {
            BillingCycle::Monthly => plan.price,
            BillingCycle::Yearly => plan.price / 12.0,
        })
        .sum();

    PlatformStats {
        total_schools: schools.len(),
        active_schools: by_status(SchoolStatus::Active),
        pending_schools: by_status(SchoolStatus::Pending),
        suspended_schools: by_status(SchoolStatus::Suspended),
        total_branches,
        total_users,
        total_students: schools.iter().map(|s| u64::from(s.students)).sum(),
        active_plans: plans.iter().filter(|p| p.is_active).count(),
        open_tickets: tickets.iter().filter(|t| t.status.is_open()).count(),
        monthly_revenue,
    }
}

fn clean_features(features: &[String]) -> Vec<String> {
    features
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("admin@school.edu"));
        assert!(!is_valid_email("admin"));
        assert!(!is_valid_email("@school.edu"));
        assert!(!is_valid_email("admin@school"));
        assert!(!is_valid_email("ad min@school.edu"));
        assert!(!is_valid_email("a@b@school.edu"));
    }

    #[test]
    fn revenue_counts_active_schools_monthly() {
        let monthly = Plan::new("Basic", 100.0, BillingCycle::Monthly);
        let yearly = Plan::new("Pro", 1200.0, BillingCycle::Yearly);
        let schools = vec![
            School::new("A", "X").with_status(SchoolStatus::Active).with_plan(monthly.id),
            School::new("B", "Y").with_status(SchoolStatus::Active).with_plan(yearly.id),
            School::new("C", "Z").with_status(SchoolStatus::Suspended).with_plan(yearly.id),
            School::new("D", "W").with_students(40),
        ];

        let stats = platform_stats(&schools, 3, 7, &[monthly, yearly], &[]);
        assert_eq!(stats.total_schools, 4);
        assert_eq!(stats.active_schools, 2);
        assert_eq!(stats.pending_schools, 1);
        assert_eq!(stats.suspended_schools, 1);
        assert_eq!(stats.total_students, 40);
        assert_eq!(stats.active_plans, 2);
        assert!((stats.monthly_revenue - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn features_are_trimmed() {
        let features = vec![" Reports ".to_string(), "".to_string(), "SMS".to_string()];
        assert_eq!(clean_features(&features), vec!["Reports", "SMS"]);
    }
}
