use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 评分服务返回的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub total: u32,
    /// 百分比 (0–100)，服务端可能缺省
    #[serde(default)]
    pub percentage: Option<f64>,
}

impl ScoreResult {
    /// 用于评级的百分比，缺失或非数字时按 0 处理
    pub fn percentage_or_zero(&self) -> f64 {
        match self.percentage {
            Some(p) if !p.is_nan() => p,
            _ => 0.0,
        }
    }

    /// 对应的评级
    pub fn tier(&self) -> RatingTier {
        RatingTier::from_percentage(self.percentage)
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} ({:.1}%)",
            self.score,
            self.total,
            self.percentage_or_zero()
        )
    }
}

/// 成绩评级，数值越大越好
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RatingTier {
    TryAgain = 1,
    GoodAttempt = 2,
    VeryGood = 3,
    Excellent = 4,
    Perfect = 5,
}

impl RatingTier {
    /// 百分比到评级的映射（从高到低的左闭右开区间）
    ///
    /// - `== 100` → 5
    /// - `>= 80` → 4
    /// - `>= 60` → 3
    /// - `>= 40` → 2
    /// - 其它 → 1
    pub fn from_percentage(percentage: Option<f64>) -> Self {
        let p = match percentage {
            Some(p) if !p.is_nan() => p,
            _ => 0.0,
        };

        if p == 100.0 {
            RatingTier::Perfect
        } else if p >= 80.0 {
            RatingTier::Excellent
        } else if p >= 60.0 {
            RatingTier::VeryGood
        } else if p >= 40.0 {
            RatingTier::GoodAttempt
        } else {
            RatingTier::TryAgain
        }
    }

    /// 数值等级 1–5
    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingTier::Perfect => "🌟 完美！",
            RatingTier::Excellent => "💕 非常棒！",
            RatingTier::VeryGood => "💖 很好",
            RatingTier::GoodAttempt => "💕 不错的尝试",
            RatingTier::TryAgain => "💔 再试一次",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RatingTier::Perfect => "😍",
            RatingTier::Excellent => "😊",
            RatingTier::VeryGood => "😌",
            RatingTier::GoodAttempt => "🙂",
            RatingTier::TryAgain => "😢",
        }
    }
}

/// 成绩页底部的结束语
pub const CLOSING_MESSAGES: [&str; 5] = [
    "💕 你的爱让我的心充满快乐",
    "💖 你是我生命中最美好的存在",
    "🌹 你的爱无价",
    "💝 和你在一起我感到真正的幸福",
    "✨ 你是我夜空中最亮的星",
];

/// 随机挑选一条结束语
pub fn random_closing_message() -> &'static str {
    let mut rng = rand::rng();
    CLOSING_MESSAGES
        .choose(&mut rng)
        .copied()
        .unwrap_or(CLOSING_MESSAGES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(p: f64) -> u8 {
        RatingTier::from_percentage(Some(p)).level()
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier(100.0), 5);
        assert_eq!(tier(99.9), 4);
        assert_eq!(tier(80.0), 4);
        assert_eq!(tier(79.9), 3);
        assert_eq!(tier(60.0), 3);
        assert_eq!(tier(40.0), 2);
        assert_eq!(tier(39.9), 1);
        assert_eq!(tier(0.0), 1);
    }

    #[test]
    fn test_tier_is_monotonic() {
        let mut last = 0;
        for step in 0..=1000 {
            let level = tier(step as f64 / 10.0);
            assert!(level >= last, "tier dropped at {}", step as f64 / 10.0);
            last = level;
        }
    }

    #[test]
    fn test_closing_message_comes_from_list() {
        for _ in 0..20 {
            assert!(CLOSING_MESSAGES.contains(&random_closing_message()));
        }
    }

    #[test]
    fn test_missing_percentage_treated_as_zero() {
        assert_eq!(RatingTier::from_percentage(None), RatingTier::TryAgain);
        assert_eq!(RatingTier::from_percentage(Some(f64::NAN)), RatingTier::TryAgain);

        let result: ScoreResult = serde_json::from_str(r#"{"score": 3, "total": 4}"#).unwrap();
        assert_eq!(result.percentage, None);
        assert_eq!(result.tier(), RatingTier::TryAgain);
        assert_eq!(result.to_string(), "3 / 4 (0.0%)");
    }
}
