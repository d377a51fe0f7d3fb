// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! POSIX shell blocks embedded in the hook files.
//!
//! The placeholder message is embedded inside double quotes; config
//! validation guarantees it carries no `"`, `\`, `$`, backtick or newline.

use super::HookSettings;
use crate::sentinel::SentinelKind;

const GIT_DIR_FN: &str = r#"dcjs_git_dir() {
    git rev-parse --git-dir 2>/dev/null || echo ".git"
}"#;

/// Block for `pre-push`.
///
/// Reads the `<local ref> <local sha> <remote ref> <remote sha>` lines git
/// passes on stdin and inspects only the commits being pushed. Deleted refs
/// are skipped; refs new to the remote are checked against every commit not
/// yet on any remote-tracking branch. Without input it falls back to
/// `@{u}..HEAD`. Stdin is handed back afterwards so hook content below the
/// block still sees the ref lines.
#[must_use]
pub fn pre_push_block(settings: &HookSettings) -> String {
    let message = &settings.message;
    let sentinel = SentinelKind::PushBlocked.file_name();
    let notice = if settings.banner {
        format!(
            r#"    printf '\033[1;31m%s\033[0m\n' \
        "" \
        "==================== PUSH BLOCKED ====================" \
        "  Found commit with '{message}'" \
        "  Please remove or amend the commit before pushing." \
        "======================================================" \
        "" >&2"#
        )
    } else {
        format!(r#"    echo "push blocked: found commit with '{message}'" >&2"#)
    };

    format!(
        r#"{GIT_DIR_FN}

dcjs_flagged() {{
    git log --pretty=%B "$@" 2>/dev/null | grep -qF -e "{message}"
}}

dcjs_check_push() {{
    seen=""
    blocked=""
    while read -r local_ref local_sha remote_ref remote_sha; do
        [ -n "$local_sha" ] || continue
        seen=1
        case "$local_sha" in
            *[!0]*) ;;
            *) continue ;;
        esac
        case "$remote_sha" in
            *[!0]*)
                if git cat-file -e "$remote_sha^{{commit}}" 2>/dev/null; then
                    dcjs_flagged "$remote_sha..$local_sha" && blocked=1
                else
                    dcjs_flagged "$local_sha" --not --remotes && blocked=1
                fi
                ;;
            *)
                dcjs_flagged "$local_sha" --not --remotes && blocked=1
                ;;
        esac
    done <<DCJS_REFS
$1
DCJS_REFS

    if [ -z "$seen" ]; then
        dcjs_flagged "@{{u}}..HEAD" && blocked=1
    fi
    if [ -z "$blocked" ]; then
        return 0
    fi

    git_dir="$(dcjs_git_dir)"
    touch "$git_dir/{sentinel}" 2>/dev/null || true
{notice}
    return 1
}}

dcjs_refs=""
if [ ! -t 0 ]; then
    dcjs_refs="$(cat)"
fi
if ! dcjs_check_push "$dcjs_refs"; then
    exit 1
fi
exec 0<<DCJS_REFS
$dcjs_refs
DCJS_REFS"#
    )
}

/// Block for `post-merge`. Never fails the merge.
#[must_use]
pub fn post_merge_block(settings: &HookSettings) -> String {
    let message = &settings.message;
    let depth = settings.pull_fallback_depth;
    let sentinel = SentinelKind::PullDetected.file_name();

    format!(
        r#"{GIT_DIR_FN}

dcjs_check_pull() {{
    git_dir="$(dcjs_git_dir)"

    if [ -f "$git_dir/ORIG_HEAD" ]; then
        commits="$(git log ORIG_HEAD..HEAD --pretty=%B 2>/dev/null || true)"
    else
        commits="$(git log -{depth} --pretty=%B 2>/dev/null || true)"
    fi

    if printf '%s\n' "$commits" | grep -qF -e "{message}"; then
        touch "$git_dir/{sentinel}" 2>/dev/null || true
    fi

    return 0
}}

dcjs_check_pull || true"#
    )
}
