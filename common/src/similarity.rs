//! 文字列類似度（編集距離ベース）

/// 類似度を計算する
///
/// `(len1 + len2 - dist) / (len1 + len2)`。`dist` は挿入・削除のみの編集距離。
/// 両方とも空文字列なら完全一致とみなして `1.0` を返す。
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    similarity_ratio_chars(&a_chars, &b_chars)
}

/// 文字配列版の類似度（事前に分解した文字列を使い回す場合）
pub fn similarity_ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let distance = indel_distance(a, b);
    (total - distance) as f64 / total as f64
}

/// 挿入・削除のみの編集距離
pub fn indel_distance(a: &[char], b: &[char]) -> usize {
    a.len() + b.len() - 2 * lcs_length(a, b)
}

/// 最長共通部分列の長さ（2行DP）
fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// 先頭を大文字、残りを小文字にする（"bMW" -> "Bmw"）
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
