//! Resolution of the acting account for permission checks.

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{Error, Student, StudentId};

/// Map student repository failures into domain errors.
pub(crate) fn map_student_repository_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
        StudentRepositoryError::DuplicateUsername { username } => {
            Error::conflict(format!("username {username} is already registered")).with_details(
                serde_json::json!({ "field": "username", "code": "duplicate_username" }),
            )
        }
    }
}

/// Look up the acting account. Unknown actors are unauthorised.
pub(crate) async fn resolve_actor<S>(students: &S, actor: &StudentId) -> Result<Student, Error>
where
    S: StudentRepository + ?Sized,
{
    students
        .find_by_id(actor)
        .await
        .map_err(map_student_repository_error)?
        .ok_or_else(|| Error::unauthorized("acting account is not registered"))
}

/// Look up the acting account and require staff rights.
pub(crate) async fn require_staff<S>(students: &S, actor: &StudentId) -> Result<Student, Error>
where
    S: StudentRepository + ?Sized,
{
    let account = resolve_actor(students, actor).await?;
    if account.is_staff {
        Ok(account)
    } else {
        Err(Error::forbidden("course management requires staff rights"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockStudentRepository;
    use crate::domain::{StudentRegistration, Username};
    use rstest::rstest;

    fn account(is_staff: bool) -> Student {
        StudentRegistration::new("adm", None, is_staff)
            .expect("valid registration")
            .into_student(StudentId::random())
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::Forbidden))]
    #[tokio::test]
    async fn require_staff_checks_flag(#[case] is_staff: bool, #[case] expected: Option<ErrorCode>) {
        let student = account(is_staff);
        let id = student.id;
        let mut repo = MockStudentRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(student)));

        let result = require_staff(&repo, &id).await;
        assert_eq!(result.err().map(|err| err.code()), expected);
    }

    #[tokio::test]
    async fn unknown_actor_is_unauthorised() {
        let mut repo = MockStudentRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let err = resolve_actor(&repo, &StudentId::random())
            .await
            .expect_err("unknown actor");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case(StudentRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(StudentRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(StudentRepositoryError::duplicate_username("stu"), ErrorCode::Conflict)]
    fn repository_errors_map_to_codes(
        #[case] error: StudentRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_student_repository_error(error).code(), expected);
    }

    #[test]
    fn duplicate_username_names_the_field() {
        let username = Username::new("stu").expect("valid username");
        let err = map_student_repository_error(StudentRepositoryError::duplicate_username(
            username.as_str(),
        ));
        let details = err.details().expect("details present");
        assert_eq!(details["code"], "duplicate_username");
    }
}
