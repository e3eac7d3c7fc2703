use crate::errors::{AppError, AppResult};
use crate::models::domain::{Quiz, QuizGrade};

pub struct QuizAttemptService;

impl QuizAttemptService {
    /// Grade MCQ responses by exact match against each item's answer.
    ///
    /// Responses line up with `quiz.mcq` by position; missing or `None`
    /// responses count as wrong. Short-answer items are not graded.
    pub fn grade_attempt(quiz: &Quiz, responses: &[Option<String>]) -> AppResult<QuizGrade> {
        if responses.len() > quiz.mcq.len() {
            return Err(AppError::InputError(format!(
                "Got {} responses for {} questions",
                responses.len(),
                quiz.mcq.len()
            )));
        }

        let results: Vec<bool> = quiz
            .mcq
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                responses
                    .get(idx)
                    .and_then(Option::as_deref)
                    .is_some_and(|response| item.is_correct(response))
            })
            .collect();

        let total = results.len();
        let correct = results.iter().filter(|r| **r).count();

        Ok(QuizGrade {
            correct,
            total,
            score: Self::score(correct, total),
            results,
        })
    }

    /// Whole percentage, rounded down; zero when there is nothing to grade.
    pub fn score(correct: usize, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        (correct.min(total) * 100 / total) as u32
    }
}
