use crate::config::LinkerConfig;
use crate::models::MatchCandidate;

/// 按置信度排序并选出要保留的候选
///
/// 1. 第一名 >= accept_threshold 且唯一或领先第二名超过 clear_gap: 只保留第一名
/// 2. 第二名 >= ambiguity_threshold: 保留前 ambiguous_group_size 名, 交给 UI 区分
/// 3. 否则只保留第一名
///
/// 规则 2 按现有候选数截断: 只有两个候选且都足够接近时返回两个。
///
/// 排序稳定, 同分时保持发现顺序。
pub fn rank_and_select(mut candidates: Vec<MatchCandidate>, config: &LinkerConfig) -> Vec<MatchCandidate> {
    if candidates.is_empty() {
        return candidates;
    }

    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let top = candidates[0].confidence;
    let second = candidates.get(1).map(|c| c.confidence);

    let keep = match second {
        None if top >= config.accept_threshold => 1,
        Some(s) if top >= config.accept_threshold && top - s > config.clear_gap => 1,
        Some(s) if s >= config.ambiguity_threshold => config.ambiguous_group_size,
        _ => 1,
    };

    candidates.truncate(keep);
    candidates
}
