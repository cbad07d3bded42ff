//! User-facing text. The site is Russian-language.
use crate::error::{ApiError, AuthError, ValidationError};
use crate::state::admin::{MutationKind, Notice};
use crate::state::public::SubmitError;

pub const SITE_NAME: &str = "MegaSchoolChat";
pub const PUBLIC_TITLE: &str = "Отзывы о MegaSchoolChat";
pub const PUBLIC_SUBTITLE: &str = "Узнайте, что говорят пользователи о нашей нейросети для образования";
pub const REVIEWS: &str = "Отзывы";
pub const WRITE_REVIEW: &str = "Написать отзыв";
pub const NEW_REVIEW: &str = "Новый отзыв";
pub const NICKNAME: &str = "Ваш никнейм";
pub const NICKNAME_PLACEHOLDER: &str = "Введите имя";
pub const RATING: &str = "Оценка";
pub const REVIEW_TEXT: &str = "Ваш отзыв";
pub const REVIEW_PLACEHOLDER: &str = "Поделитесь впечатлениями...";
pub const SEND_REVIEW: &str = "Отправить отзыв";
pub const CLOSE: &str = "Закрыть";

pub const ADMIN_TITLE: &str = "Админ-панель";
pub const ACCESS_CODE: &str = "Код доступа";
pub const ENTER_CODE: &str = "Введите код";
pub const SIGN_IN: &str = "Войти";
pub const BACK_HOME: &str = "Вернуться на главную";
pub const REFRESH: &str = "Обновить";
pub const HOME: &str = "На главную";
pub const SIGN_OUT: &str = "Выйти";
pub const STATISTICS: &str = "Статистика";
pub const TOTAL: &str = "Всего отзывов";
pub const PUBLISHED: &str = "Опубликовано";
pub const HIDDEN: &str = "Скрыто";
pub const HIDE: &str = "Скрыть";
pub const SHOW: &str = "Показать";
pub const DELETE: &str = "Удалить";
pub const CANCEL: &str = "Отмена";
pub const CONFIRM_DELETE: &str = "Вы уверены, что хотите удалить этот отзыв?";
pub const EMPTY_LIST: &str = "Отзывов пока нет";

pub fn auth_error(err: &AuthError) -> String {
    match err {
        AuthError::InvalidCode => "Неверный код доступа".to_string(),
    }
}

fn validation_error(err: &ValidationError) -> String {
    match err {
        ValidationError::EmptyNickname => "Укажите никнейм".to_string(),
        ValidationError::EmptyText => "Напишите текст отзыва".to_string(),
        ValidationError::RatingOutOfRange(_) => "Оценка должна быть от 1 до 5".to_string(),
    }
}

fn api_error(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized => "Сервер отклонил код доступа".to_string(),
        ApiError::Network(_) => "Нет связи с сервером".to_string(),
        ApiError::Service { status, .. } => format!("Ошибка сервера ({status})"),
        ApiError::Decode(_) => "Сервер вернул некорректный ответ".to_string(),
    }
}

pub fn submit_error(err: &SubmitError) -> String {
    match err {
        SubmitError::Invalid(err) => validation_error(err),
        SubmitError::Failed(err) => format!("Не удалось отправить отзыв: {}", api_error(err)),
        SubmitError::Busy => "Отзыв уже отправляется".to_string(),
    }
}

pub fn notice(notice: &Notice) -> String {
    match notice {
        Notice::LoadFailed(err) => format!("Не удалось загрузить отзывы: {}", api_error(err)),
        Notice::Applied(MutationKind::Toggle) => "Видимость отзыва изменена".to_string(),
        Notice::Applied(MutationKind::Delete) => "Отзыв удалён".to_string(),
        Notice::Failed(MutationKind::Toggle, err) => {
            format!("Видимость не изменена: {}", api_error(err))
        }
        Notice::Failed(MutationKind::Delete, err) => format!("Отзыв не удалён: {}", api_error(err)),
        Notice::SessionRejected => "Сессия завершена: код доступа больше не действует".to_string(),
    }
}
