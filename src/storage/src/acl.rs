// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Access control lists for buckets and objects.
//!
//! An [Acl] grants a [Role] to an [Entity]. The entity identifies the
//! grantee: a domain, a group, the members of a project team, a user, or
//! some entity this library does not model, kept in its raw form.
//!
//! # Example
//! ```
//! # use gcloud_storage::acl::{Acl, Entity, ProjectRole, Project, Role, User};
//! let acl = Acl::new(User::all_users(), Role::Reader);
//! assert_eq!(acl.entity().to_string(), "allUsers");
//!
//! let entity = Entity::from(Project::new(ProjectRole::Viewers, "my-project")?);
//! assert_eq!(entity.to_string(), "project-viewers-my-project");
//! assert_eq!(Entity::from_wire("project-viewers-my-project")?, entity);
//! # gcloud_storage::Result::<()>::Ok(())
//! ```

use crate::Result;
use gax::error::Error;

const ALL_USERS: &str = "allUsers";
const ALL_AUTHENTICATED_USERS: &str = "allAuthenticatedUsers";

/// An access control entry: the grantee and its role.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acl {
    entity: Entity,
    role: Role,
}

impl Acl {
    pub fn new<E: Into<Entity>>(entity: E, role: Role) -> Self {
        Self {
            entity: entity.into(),
            role,
        }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// The permission level granted by an [Acl].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    Reader,
    Writer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Reader => "READER",
            Self::Writer => "WRITER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the grantee of an [Acl].
///
/// Two entities are equal if they are the same variant with the same fields.
/// [Display][std::fmt::Display] produces the string used by the service,
/// [Entity::from_wire] parses it back.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[non_exhaustive]
pub enum Entity {
    Domain(Domain),
    Group(Group),
    Project(Project),
    User(User),
    Raw(RawEntity),
}

impl Entity {
    /// Parses the entity string used by the service.
    ///
    /// Strings without a known prefix become [Entity::Raw].
    ///
    /// # Example
    /// ```
    /// # use gcloud_storage::acl::{Entity, User};
    /// assert_eq!(Entity::from_wire("user-jane@example.com")?, Entity::from(User::new("jane@example.com")?));
    /// assert!(matches!(Entity::from_wire("something-else")?, Entity::Raw(_)));
    /// # gcloud_storage::Result::<()>::Ok(())
    /// ```
    pub fn from_wire(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::invalid_argument("the ACL entity cannot be empty"));
        }
        if value == ALL_USERS {
            return Ok(User::all_users().into());
        }
        if value == ALL_AUTHENTICATED_USERS {
            return Ok(User::all_authenticated_users().into());
        }
        let parsed = if let Some(d) = value.strip_prefix("domain-") {
            Domain::new(d).ok().map(Self::Domain)
        } else if let Some(g) = value.strip_prefix("group-") {
            Group::new(g).ok().map(Self::Group)
        } else if let Some(u) = value.strip_prefix("user-") {
            User::new(u).ok().map(Self::User)
        } else if let Some(p) = value.strip_prefix("project-") {
            p.split_once('-').and_then(|(role, id)| {
                let role = ProjectRole::from_wire(role)?;
                Project::new(role, id).ok().map(Self::Project)
            })
        } else {
            None
        };
        match parsed {
            Some(e) => Ok(e),
            None => RawEntity::new(value).map(Self::Raw),
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(d) => write!(f, "domain-{}", d.domain),
            Self::Group(g) => write!(f, "group-{}", g.email),
            Self::Project(p) => write!(f, "project-{}-{}", p.project_role, p.project_id),
            Self::User(u) if u.is_special() => f.write_str(&u.email),
            Self::User(u) => write!(f, "user-{}", u.email),
            Self::Raw(r) => f.write_str(&r.entity),
        }
    }
}

fn non_empty(field: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(Error::invalid_argument(format!(
            "the ACL {field} cannot be empty"
        )));
    }
    Ok(value)
}

/// All the users in a Google Workspace or Cloud Identity domain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    #[serde(deserialize_with = "crate::names::non_empty")]
    domain: String,
}

impl Domain {
    pub fn new<T: Into<String>>(domain: T) -> Result<Self> {
        Ok(Self {
            domain: non_empty("domain", domain.into())?,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl From<Domain> for Entity {
    fn from(value: Domain) -> Self {
        Self::Domain(value)
    }
}

/// A Google group, identified by its email.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(deserialize_with = "crate::names::non_empty")]
    email: String,
}

impl Group {
    pub fn new<T: Into<String>>(email: T) -> Result<Self> {
        Ok(Self {
            email: non_empty("group email", email.into())?,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl From<Group> for Entity {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

/// The role of a team within a project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectRole {
    Owners,
    Editors,
    Viewers,
}

impl ProjectRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owners => "owners",
            Self::Editors => "editors",
            Self::Viewers => "viewers",
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "owners" => Some(Self::Owners),
            "editors" => Some(Self::Editors),
            "viewers" => Some(Self::Viewers),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The members of a project team with a given role.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    project_role: ProjectRole,
    #[serde(deserialize_with = "crate::names::non_empty")]
    project_id: String,
}

impl Project {
    pub fn new<T: Into<String>>(project_role: ProjectRole, project_id: T) -> Result<Self> {
        Ok(Self {
            project_role,
            project_id: non_empty("project id", project_id.into())?,
        })
    }

    pub fn project_role(&self) -> ProjectRole {
        self.project_role
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}

impl From<Project> for Entity {
    fn from(value: Project) -> Self {
        Self::Project(value)
    }
}

/// A user, identified by its email.
///
/// [User::all_users] and [User::all_authenticated_users] represent anybody
/// on the internet, and anybody with a Google account, respectively.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "crate::names::non_empty")]
    email: String,
}

impl User {
    pub fn new<T: Into<String>>(email: T) -> Result<Self> {
        Ok(Self {
            email: non_empty("user email", email.into())?,
        })
    }

    pub fn all_users() -> Self {
        Self {
            email: ALL_USERS.to_string(),
        }
    }

    pub fn all_authenticated_users() -> Self {
        Self {
            email: ALL_AUTHENTICATED_USERS.to_string(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    fn is_special(&self) -> bool {
        self.email == ALL_USERS || self.email == ALL_AUTHENTICATED_USERS
    }
}

impl From<User> for Entity {
    fn from(value: User) -> Self {
        Self::User(value)
    }
}

/// An entity in a format not modeled by this library.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntity {
    #[serde(deserialize_with = "crate::names::non_empty")]
    entity: String,
}

impl RawEntity {
    pub fn new<T: Into<String>>(entity: T) -> Result<Self> {
        Ok(Self {
            entity: non_empty("entity", entity.into())?,
        })
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }
}

impl From<RawEntity> for Entity {
    fn from(value: RawEntity) -> Self {
        Self::Raw(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn entities() -> anyhow::Result<Vec<Entity>> {
        Ok(vec![
            Domain::new("example.com")?.into(),
            Group::new("team@example.com")?.into(),
            Project::new(ProjectRole::Viewers, "pid")?.into(),
            User::new("jane@example.com")?.into(),
            User::all_users().into(),
            User::all_authenticated_users().into(),
            RawEntity::new("raw")?.into(),
        ])
    }

    #[test]
    fn wire_format() -> anyhow::Result<()> {
        let got = entities()?
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            got,
            vec![
                "domain-example.com",
                "group-team@example.com",
                "project-viewers-pid",
                "user-jane@example.com",
                "allUsers",
                "allAuthenticatedUsers",
                "raw",
            ]
        );
        Ok(())
    }

    #[test]
    fn from_wire() -> anyhow::Result<()> {
        for entity in entities()? {
            let got = Entity::from_wire(&entity.to_string())?;
            assert_eq!(got, entity);
        }
        Ok(())
    }

    #[test_case("project-unknown-pid"; "unknown project role")]
    #[test_case("project-viewers"; "missing project id")]
    #[test_case("domain-"; "empty domain")]
    #[test_case("allDevelopers"; "no prefix")]
    fn from_wire_raw(value: &str) -> anyhow::Result<()> {
        let got = Entity::from_wire(value)?;
        assert_eq!(got, Entity::Raw(RawEntity::new(value)?));
        Ok(())
    }

    #[test]
    fn from_wire_empty() {
        let got = Entity::from_wire("");
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
    }

    #[test]
    fn empty_fields() {
        let got = Domain::new("");
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        let got = Group::new("");
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        let got = Project::new(ProjectRole::Owners, "");
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        let got = User::new("");
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        let got = RawEntity::new("");
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
    }

    #[test]
    fn equality() -> anyhow::Result<()> {
        let a = Entity::from(Group::new("same")?);
        let b = Entity::from(User::new("same")?);
        assert_ne!(a, b);
        assert_eq!(a, Entity::from(Group::new("same")?));

        let a = Project::new(ProjectRole::Owners, "p")?;
        let b = Project::new(ProjectRole::Editors, "p")?;
        assert_ne!(a, b);
        Ok(())
    }

    #[test]
    fn acl() -> anyhow::Result<()> {
        let acl = Acl::new(Domain::new("example.com")?, Role::Writer);
        assert_eq!(acl.entity(), &Entity::Domain(Domain::new("example.com")?));
        assert_eq!(acl.role(), Role::Writer);
        assert_eq!(acl.role().to_string(), "WRITER");
        Ok(())
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        let acl = Acl::new(Project::new(ProjectRole::Editors, "pid")?, Role::Owner);
        let json = serde_json::to_value(&acl)?;
        assert_eq!(
            json,
            serde_json::json!({
                "entity": {"type": "project", "projectRole": "editors", "projectId": "pid"},
                "role": "OWNER",
            })
        );
        let copy = serde_json::from_value::<Acl>(json)?;
        assert_eq!(copy, acl);
        Ok(())
    }

    #[test_case(serde_json::json!({"type": "domain", "domain": ""}); "domain")]
    #[test_case(serde_json::json!({"type": "group", "email": ""}); "group")]
    #[test_case(serde_json::json!({"type": "project", "projectRole": "owners", "projectId": ""}); "project")]
    #[test_case(serde_json::json!({"type": "user", "email": ""}); "user")]
    #[test_case(serde_json::json!({"type": "raw", "entity": ""}); "raw")]
    fn deserialize_empty(json: serde_json::Value) {
        let got = serde_json::from_value::<Entity>(json);
        assert!(got.is_err(), "{got:?}");
    }

    #[test]
    fn send_sync() {
        static_assertions::assert_impl_all!(Acl: Send, Sync, Clone);
        static_assertions::assert_impl_all!(Entity: Send, Sync, Clone);
    }
}
