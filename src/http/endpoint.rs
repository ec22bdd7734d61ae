//! Operation table and authenticated URL composition.
//!
//! The table is the versioned contract with the platform's REST API v4: every
//! logical operation the SDK can dispatch has exactly one path here.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::SdkError;
use crate::shared::random_digits;

lazy_static! {
    static ref OPERATIONS: HashMap<&'static str, &'static str> = HashMap::from([
        // Single chat messages
        ("SendMsg", "v4/openim/sendmsg"),
        ("BatchSendMsg", "v4/openim/batchsendmsg"),
        ("ImportMsg", "v4/openim/importmsg"),
        ("QueryMsg", "v4/openim/admin_getroammsg"),
        ("MsgWithdraw", "v4/openim/admin_msgwithdraw"),
        ("SetMsgRead", "v4/openim/admin_set_msg_read"),
        ("GetC2CUnreadMsgNum", "v4/openim/get_c2c_unread_msg_num"),
        // Recent contacts
        ("GetRecentContact", "v4/recentcontact/get_list"),
        ("DeleteRecentContact", "v4/recentcontact/delete"),
        // Accounts
        ("AccountImport", "v4/im_open_login_svc/account_import"),
        ("MultiAccountImport", "v4/im_open_login_svc/multiaccount_import"),
        ("AccountDelete", "v4/im_open_login_svc/account_delete"),
        ("AccountCheck", "v4/im_open_login_svc/account_check"),
        ("AccountInvalid", "v4/im_open_login_svc/kick"),
        ("AccountStatus", "v4/openim/query_online_status"),
        // Profiles
        ("PortraitSet", "v4/profile/portrait_set"),
        ("PortraitGet", "v4/profile/portrait_get"),
    ]);
}

/// Every operation name the table knows.
pub fn operations() -> impl Iterator<Item = &'static str> {
    OPERATIONS.keys().copied()
}

/// Path for `operation`, or [`SdkError::UnknownOperation`].
pub fn resolve(operation: &str) -> Result<&'static str, SdkError> {
    OPERATIONS.get(operation).copied().ok_or_else(|| {
        tracing::error!(operation, "IM operation missing from endpoint table");
        SdkError::UnknownOperation(operation.to_string())
    })
}

/// Authentication parameters appended to every call.
#[derive(Debug, Clone, Copy)]
pub struct AuthParams<'a> {
    pub app_id: u64,
    pub identifier: &'a str,
    pub user_sig: &'a str,
}

/// `<host>/<path>?contenttype=json&sdkappid=..&identifier=..&usersig=..&random=..`
///
/// A fresh `random` is drawn on every call.
pub fn compose_url(host: &str, path: &str, auth: AuthParams<'_>) -> String {
    let app_id = auth.app_id.to_string();
    let random = random_digits(5);
    let query = [
        ("contenttype", "json"),
        ("sdkappid", app_id.as_str()),
        ("identifier", auth.identifier),
        ("usersig", auth.user_sig),
        ("random", random.as_str()),
    ]
    .iter()
    .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
    .collect::<Vec<_>>()
    .join("&");

    format!(
        "{}/{}?{}",
        host.trim_end_matches('/'),
        path.trim_start_matches('/'),
        query
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth<'a>(identifier: &'a str, user_sig: &'a str) -> AuthParams<'a> {
        AuthParams {
            app_id: 1400000000,
            identifier,
            user_sig,
        }
    }

    fn query_pairs(url: &str) -> Vec<(String, String)> {
        let query = url.split_once('?').unwrap().1;
        query
            .split('&')
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap();
                (k.to_string(), urlencoding::decode(v).unwrap().into_owned())
            })
            .collect()
    }

    #[test]
    fn test_resolve_known_operation() {
        assert_eq!(resolve("SendMsg").unwrap(), "v4/openim/sendmsg");
        assert_eq!(
            resolve("GetRecentContact").unwrap(),
            "v4/recentcontact/get_list"
        );
    }

    #[test]
    fn test_resolve_unknown_operation() {
        let err = resolve("SendMsgTypo").unwrap_err();
        assert!(matches!(err, SdkError::UnknownOperation(ref name) if name == "SendMsgTypo"));
    }

    #[test]
    fn test_every_operation_resolves_to_v4_path() {
        for op in operations() {
            assert!(resolve(op).unwrap().starts_with("v4/"), "{}", op);
        }
    }

    #[test]
    fn test_url_has_each_param_exactly_once() {
        let url = compose_url(
            "https://console.tim.qq.com",
            resolve("SendMsg").unwrap(),
            auth("admin", "eJw*sig-_"),
        );
        assert!(url.starts_with("https://console.tim.qq.com/v4/openim/sendmsg?"));

        let pairs = query_pairs(&url);
        for key in ["contenttype", "sdkappid", "identifier", "usersig", "random"] {
            assert_eq!(
                pairs.iter().filter(|(k, _)| k == key).count(),
                1,
                "{} should appear once",
                key
            );
        }
        let get = |key: &str| pairs.iter().find(|(k, _)| k == key).unwrap().1.clone();
        assert_eq!(get("contenttype"), "json");
        assert_eq!(get("sdkappid"), "1400000000");
        assert_eq!(get("identifier"), "admin");
        assert_eq!(get("usersig"), "eJw*sig-_");
        assert_eq!(get("random").len(), 5);
    }

    #[test]
    fn test_values_are_escaped() {
        let url = compose_url("https://h", "v4/p", auth("admin&x=1", "a b/c"));
        assert!(url.contains("identifier=admin%26x%3D1"));
        assert!(url.contains("usersig=a%20b%2Fc"));
    }

    #[test]
    fn test_host_and_path_joining() {
        let a = compose_url("https://h.example", "v4/p", auth("a", "s"));
        let b = compose_url("https://h.example/", "/v4/p", auth("a", "s"));
        assert!(a.starts_with("https://h.example/v4/p?"));
        assert!(b.starts_with("https://h.example/v4/p?"));
    }

    #[test]
    fn test_random_drawn_per_call() {
        let randoms: std::collections::HashSet<String> = (0..20)
            .map(|_| {
                let url = compose_url("https://h", "v4/p", auth("a", "s"));
                query_pairs(&url)
                    .into_iter()
                    .find(|(k, _)| k == "random")
                    .unwrap()
                    .1
            })
            .collect();
        assert!(randoms.len() > 1);
    }
}
