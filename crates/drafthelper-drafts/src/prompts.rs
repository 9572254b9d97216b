// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed prompt templates.

/// System instruction for email drafts.
pub const EMAIL_SYSTEM_INSTRUCTION: &str = "Ты профессиональный помощник. Пиши на русском языке.";

/// System instruction for social post drafts.
pub const POST_SYSTEM_INSTRUCTION: &str = "Ты креативный блогер. Пиши вовлекающе на русском языке.";

/// Builds the user prompt for an email draft.
pub fn email_prompt(to: &str, subject: &str, key_points: &str) -> String {
    format!("Напиши вежливое письмо для {to} на тему {subject}. Основные тезисы: {key_points}.")
}

/// Builds the user prompt for a post draft.
pub fn post_prompt(topic: &str, keywords: &str) -> String {
    format!("Напиши креативный пост на тему: {topic}. Используй ключевые слова: {keywords}.")
}
