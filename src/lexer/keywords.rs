/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * File:      keywords.rs
 * Purpose:   Reserved-word lookup used by the lexer during tokenization.
 *
 * Author:    Sam Wilcox
 * Email:     sam@pawx-lang.com
 * Website:   https://www.pawx-lang.com
 * GitHub:    https://github.com/samwilcox/pawx
 *
 * License:
 * This file is part of the PAWX programming language project.
 *
 * PAWX is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use crate::lexer::token::Keyword;

/// Classifies an identifier-shaped word as a reserved keyword, or `None`
/// if it should be tokenized as a plain identifier.
pub fn lookup(word: &str) -> Option<Keyword> {
    Keyword::lookup(word)
}
