use rand::Rng;
use rand::seq::IndexedRandom;

/// Desktop platform a request pretends to come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformInfo {
    pub user_agent_platform: &'static str,
    pub sec_ch_ua_platform: &'static str,
}

// The schedule site serves a different, script-heavy layout to mobile agents.
const PLATFORMS: [PlatformInfo; 3] = [
    PlatformInfo {
        user_agent_platform: "Windows NT 10.0; Win64; x64",
        sec_ch_ua_platform: "Windows",
    },
    PlatformInfo {
        user_agent_platform: "Macintosh; Intel Mac OS X 10_15_7",
        sec_ch_ua_platform: "macOS",
    },
    PlatformInfo {
        user_agent_platform: "X11; Linux x86_64",
        sec_ch_ua_platform: "Linux",
    },
];

pub fn random_platform() -> PlatformInfo {
    let mut rng = rand::rng();
    *PLATFORMS.choose(&mut rng).unwrap_or(&PLATFORMS[0])
}

pub fn random_user_agent(platform: &PlatformInfo) -> String {
    let mut rng = rand::rng();

    let browser = match rng.random_range(0..3) {
        0 => format!(
            "AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.0.0 Safari/537.36",
            120 + rng.random_range(0..15)
        ),
        1 => format!(
            "Gecko/20100101 Firefox/{}.0",
            115 + rng.random_range(0..20)
        ),
        _ => format!(
            "AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{0}.0.0.0 Safari/537.36 Edg/{0}.0.0.0",
            120 + rng.random_range(0..15)
        ),
    };

    format!("Mozilla/5.0 ({}) {}", platform.user_agent_platform, browser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_names_the_platform() {
        let platform = random_platform();
        assert!(PLATFORMS.contains(&platform));
        let agent = random_user_agent(&platform);
        assert!(agent.starts_with("Mozilla/5.0 ("));
        assert!(agent.contains(platform.user_agent_platform));
    }
}
